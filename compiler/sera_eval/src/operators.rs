//! Binary operator implementations.
//!
//! Direct enum-based dispatch: the type set is fixed, so pattern matching
//! is preferred over trait objects for exhaustiveness checking. String
//! concatenation always allocates a fresh value; `+` between a string and
//! a non-string display-coerces the non-string side, preserving
//! left-to-right operand order.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{
    binary_type_mismatch, index_out_of_range, integer_overflow, invalid_binary_op_for, EvalError,
    EvalResult,
};
use crate::{StrValue, Value};

/// Binary operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// Evaluate a binary operation using direct pattern matching.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Char(a), Value::Char(b)) => eval_char_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        // Heterogeneous `+` with a string on either side: display-coerce
        // the other operand, keep operand order.
        (Value::Str(a), _) if op == BinaryOp::Add => {
            Ok(Value::Str(a.concat(&right.display_value())))
        }
        (_, Value::Str(b)) if op == BinaryOp::Add => {
            Ok(Value::Str(left.display_value().concat(b)))
        }
        _ => Err(binary_type_mismatch(left.type_name(), right.type_name())),
    }
}

/// Binary operations on integers, all through checked arithmetic.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a
            .checked_sub(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
    }
}

/// Binary operations on floats.
#[allow(clippy::float_cmp, reason = "language equality is IEEE equality")]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
    }
}

/// Binary operations on booleans.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op_for("booleans", op)),
    }
}

/// Binary operations on chars (scalar-value ordering).
fn eval_char_binary(a: char, b: char, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op_for("chars", op)),
    }
}

/// Binary operations on strings.
///
/// Concatenation allocates a new value; comparisons are per-scalar
/// lexicographic with shorter-is-less for prefixes.
fn eval_string_binary(a: &StrValue, b: &StrValue, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Str(a.concat(b))),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a.compare(b) == Ordering::Less)),
        BinaryOp::LtEq => Ok(Value::Bool(a.compare(b) != Ordering::Greater)),
        BinaryOp::Gt => Ok(Value::Bool(a.compare(b) == Ordering::Greater)),
        BinaryOp::GtEq => Ok(Value::Bool(a.compare(b) != Ordering::Less)),
        BinaryOp::Sub => Err(invalid_binary_op_for("strings", op)),
    }
}

// Indexed String Access

/// Read one scalar of a string by language-level (signed) index.
pub fn index_string(s: &StrValue, index: i64) -> EvalResult {
    let idx = checked_index(s, index)?;
    s.get(idx).map(Value::Char)
}

/// Replace one scalar of a string in place by language-level index.
///
/// Length is unchanged; only the owner's buffer is touched.
pub fn index_assign_string(
    s: &mut StrValue,
    index: i64,
    scalar: char,
) -> Result<(), EvalError> {
    let idx = checked_index(s, index)?;
    s.set(idx, scalar)
}

/// Reject negative indices before the unsigned bounds check.
fn checked_index(s: &StrValue, index: i64) -> Result<usize, EvalError> {
    usize::try_from(index).map_err(|_| index_out_of_range(s.len(), index))
}
