//! Sera IR - shared representation types
//!
//! This crate contains the data structures shared between the literal
//! scanner (`sera_lexer`) and the runtime (`sera_eval`):
//! - Spans for source locations (in Unicode scalar values)
//! - Segments, the parsed form of a string literal
//!
//! It is deliberately standalone: external tools can depend on it without
//! pulling in the scanner or the evaluator.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod segment;
mod span;

pub use segment::Segment;
pub use span::{Span, SpanError};
