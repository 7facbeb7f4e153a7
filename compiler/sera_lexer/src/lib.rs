//! String-literal scanner and interpolation composer for Sera.
//!
//! This crate turns raw literal text — quoted (`"..."`) or multi-line
//! (`` `...` ``) — into an ordered sequence of decoded text segments and
//! embedded-block segments, to unbounded nesting depth. It owns:
//!
//! - [`SourceBuffer`] / [`Cursor`] — sentinel-terminated random access
//!   over the input's Unicode scalar values
//! - [`decode_escape`] — one escape form at a time, including fixed-width
//!   hex forms and line continuation
//! - [`scan_string_literal`] — the literal-mode scanner and composer,
//!   driven by an explicit [`ModeStack`] and an injected [`BlockParser`]
//!   capability for everything between `${` and `}`
//!
//! The general expression/statement grammar of the embedding language is
//! deliberately outside this crate: the composer and the statement parser
//! reference each other only through the [`BlockParser`] boundary, which
//! keeps the engine testable in isolation with a stub parser.

mod cursor;
mod escape;
mod scan_error;
mod scanner;
mod source_buffer;

pub use cursor::Cursor;
pub use escape::{decode_escape, EscapeResult};
pub use scan_error::{
    BlockError, BlockFailure, ScanError, ScanErrorContext, ScanErrorKind, ScanSuggestion,
};
pub use scanner::{
    parse_string_literal, scan_string_literal, BlockParser, DelimKind, ModeStack, ScanMode,
    ScannedLiteral, MAX_NESTING_DEPTH,
};
pub use source_buffer::SourceBuffer;
