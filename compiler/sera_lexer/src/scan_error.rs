//! Scanner error types.
//!
//! Errors follow the WHERE+WHAT+WHY+HOW shape:
//! - WHERE: `span` locating the error in source (scalar offsets)
//! - WHAT: `kind` describing what went wrong
//! - WHY: `context` explaining what the scanner was doing
//! - HOW: `suggestions` providing actionable fixes
//!
//! All types derive `Clone, Eq, PartialEq, Hash, Debug` so errors can be
//! deduplicated and used as map keys by downstream tooling.

use std::fmt;

use sera_ir::Span;

use crate::scanner::DelimKind;

/// A scanner error with full context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScanError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: ScanErrorKind,
    /// WHY we were checking (scanning context at the point of error).
    pub context: ScanErrorContext,
    /// HOW to fix (actionable suggestions).
    pub suggestions: Vec<ScanSuggestion>,
}

/// What kind of scanner error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScanErrorKind {
    /// Malformed or unrecognized escape form (e.g. `\q`, `\x4Z`, an
    /// out-of-range `\U` value, or a surrogate code point).
    InvalidEscapeSequence {
        /// The character immediately after the backslash.
        escape_char: char,
    },
    /// Literal ended without its closing delimiter, or a quoted literal
    /// hit a raw line break.
    UnterminatedStringLiteral { delim: DelimKind },
    /// A `${` interpolation with no matching `}` before input end.
    UnterminatedInterpolation,
    /// The embedded statement parser failed inside `${ ... }`.
    InterpolationParseError { cause: BlockFailure },
    /// Literal/interpolation nesting exceeded the configured limit.
    MaxNestingExceeded { limit: u32 },
}

/// Failure reported by the embedded statement-parsing capability.
///
/// The capability converts its own error type into this carrier; the
/// composer attaches it unchanged to `InterpolationParseError` — the one
/// wrapping case in the taxonomy.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BlockFailure {
    /// The parser's own message.
    pub message: String,
    /// Where the parser failed.
    pub span: Span,
}

/// Error returned by the statement-parsing capability.
///
/// Distinguishes the parser's own failures (wrapped by the composer as
/// `InterpolationParseError`) from scan errors of nested string literals,
/// which the capability must hand back unchanged so they propagate with
/// their original kind — there are no wrapping chains beyond the one
/// `InterpolationParseError` case.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum BlockError {
    /// The parser's own failure.
    Parse(BlockFailure),
    /// A nested literal scan failed; propagated unchanged.
    Scan(Box<ScanError>),
}

impl From<BlockFailure> for BlockError {
    fn from(failure: BlockFailure) -> Self {
        BlockError::Parse(failure)
    }
}

impl From<ScanError> for BlockError {
    fn from(error: ScanError) -> Self {
        BlockError::Scan(Box::new(error))
    }
}

/// Scanning context at the point of error — the WHY.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScanErrorContext {
    /// Not yet attached to a literal (factory default).
    #[default]
    TopLevel,
    /// Inside a string literal body.
    InsideLiteral { start: u32, delim: DelimKind },
    /// Inside a `${ ... }` interpolation.
    InsideInterpolation { start: u32, depth: u32 },
}

/// Suggestion for fixing a scan error — the HOW.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScanSuggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Priority (lower = more likely relevant). 0 = most likely.
    pub priority: u8,
}

impl ScanSuggestion {
    /// Create a text-only suggestion.
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}

impl ScanError {
    /// Create an invalid escape sequence error.
    #[cold]
    pub fn invalid_escape_sequence(span: Span, escape_char: char) -> Self {
        Self {
            span,
            kind: ScanErrorKind::InvalidEscapeSequence { escape_char },
            context: ScanErrorContext::default(),
            suggestions: vec![ScanSuggestion::text(
                r#"valid escapes are: \n, \t, \r, \\, \", \`, \$, \xNN, \uNNNN, \UNNNNNNNN"#,
                0,
            )],
        }
    }

    /// Create an unterminated string literal error.
    #[cold]
    pub fn unterminated_string_literal(span: Span, delim: DelimKind) -> Self {
        let fix = match delim {
            DelimKind::DoubleQuoted => r#"add closing `"` (use `\` before a line break to continue a quoted literal)"#,
            DelimKind::BacktickMultiline => "add closing `` ` ``",
        };
        Self {
            span,
            kind: ScanErrorKind::UnterminatedStringLiteral { delim },
            context: ScanErrorContext::InsideLiteral {
                start: span.start,
                delim,
            },
            suggestions: vec![ScanSuggestion::text(fix, 0)],
        }
    }

    /// Create an unterminated interpolation error.
    #[cold]
    pub fn unterminated_interpolation(span: Span) -> Self {
        Self {
            span,
            kind: ScanErrorKind::UnterminatedInterpolation,
            context: ScanErrorContext::default(),
            suggestions: vec![ScanSuggestion::text("add closing `}`", 0)],
        }
    }

    /// Create an interpolation parse error wrapping the embedded parser's
    /// failure.
    #[cold]
    pub fn interpolation_parse_error(span: Span, cause: BlockFailure) -> Self {
        Self {
            span,
            kind: ScanErrorKind::InterpolationParseError { cause },
            context: ScanErrorContext::default(),
            suggestions: Vec::new(),
        }
    }

    /// Create a nesting limit error.
    #[cold]
    pub fn max_nesting_exceeded(span: Span, limit: u32) -> Self {
        Self {
            span,
            kind: ScanErrorKind::MaxNestingExceeded { limit },
            context: ScanErrorContext::default(),
            suggestions: vec![ScanSuggestion::text(
                "flatten the interpolation by computing inner strings in separate bindings",
                0,
            )],
        }
    }

    /// Add a context to this error.
    #[must_use]
    pub fn with_context(mut self, ctx: ScanErrorContext) -> Self {
        self.context = ctx;
        self
    }

    /// Add a suggestion to this error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: ScanSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanErrorKind::InvalidEscapeSequence { escape_char } => {
                write!(f, "invalid escape sequence `\\{escape_char}`")
            }
            ScanErrorKind::UnterminatedStringLiteral { delim } => match delim {
                DelimKind::DoubleQuoted => write!(f, "unterminated string literal"),
                DelimKind::BacktickMultiline => write!(f, "unterminated multi-line string literal"),
            },
            ScanErrorKind::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation: no matching `}}`")
            }
            ScanErrorKind::InterpolationParseError { cause } => {
                write!(f, "failed to parse interpolated block: {}", cause.message)
            }
            ScanErrorKind::MaxNestingExceeded { limit } => {
                write!(f, "string nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ScanError {}
