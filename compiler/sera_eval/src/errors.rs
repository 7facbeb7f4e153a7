//! Evaluation error types and centralized factory functions.
//!
//! Centralizing the constructors keeps messages in one place: every
//! error site calls a factory, and the message always equals
//! `kind.to_string()`.

use std::fmt;

use sera_ir::Span;

use crate::operators::BinaryOp;

/// Result of an evaluation step.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category for programmatic matching.
    pub kind: EvalErrorKind,
    /// Human-readable error message (equals `kind.to_string()`).
    pub message: String,
    /// Source location, when the evaluator has one to attach.
    pub span: Option<Span>,
}

/// What kind of evaluation error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// String index outside `0..len`, or negative.
    IndexOutOfRange { len: usize, index: i64 },
    /// Binary operator applied to an unsupported pair of types.
    BinaryTypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    /// Binary operator not defined for this type.
    InvalidBinaryOp {
        type_name: &'static str,
        op: BinaryOp,
    },
    /// Integer arithmetic overflowed.
    IntegerOverflow { op: &'static str },
}

impl EvalError {
    /// Attach a source location to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::IndexOutOfRange { len, index } => {
                write!(
                    f,
                    "string index {index} out of range for length {len}"
                )
            }
            EvalErrorKind::BinaryTypeMismatch { left, right } => {
                write!(f, "cannot apply binary operator to {left} and {right}")
            }
            EvalErrorKind::InvalidBinaryOp { type_name, op } => {
                write!(f, "operator `{op}` is not defined for {type_name}")
            }
            EvalErrorKind::IntegerOverflow { op } => {
                write!(f, "integer overflow in {op}")
            }
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory Functions

/// String index outside the valid range (including negative indices).
#[cold]
pub fn index_out_of_range(len: usize, index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { len, index })
}

/// Binary operator applied to an unsupported pair of types.
#[cold]
pub fn binary_type_mismatch(left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { left, right })
}

/// Binary operator not defined for this type.
#[cold]
pub fn invalid_binary_op_for(type_name: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { type_name, op })
}

/// Integer arithmetic overflowed.
#[cold]
pub fn integer_overflow(op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { op })
}
