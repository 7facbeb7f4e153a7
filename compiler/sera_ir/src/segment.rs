//! Parsed form of a string literal.
//!
//! A scanned literal is an ordered sequence of segments: runs of
//! already-decoded text alternating with embedded blocks discovered at
//! interpolation starts. The block handle type is generic — the scanner
//! does not know (or care) what the embedding language's parser produces
//! for `${ ... }`, only that each handle is spliced back in at
//! composition time, in appearance order, exactly once.

use std::fmt;

/// One segment of a scanned string literal.
///
/// A literal owns 1..N segments; an empty literal owns a single empty
/// `Literal` segment.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Segment<B> {
    /// A run of literal text, escapes already decoded.
    Literal(String),
    /// An embedded block from a `${ ... }` interpolation.
    Interpolated(B),
}

impl<B> Segment<B> {
    /// Returns the decoded text if this is a `Literal` segment.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(text) => Some(text),
            Segment::Interpolated(_) => None,
        }
    }

    /// Returns `true` if this is an `Interpolated` segment.
    pub fn is_interpolated(&self) -> bool {
        matches!(self, Segment::Interpolated(_))
    }
}

impl<B: fmt::Debug> fmt::Debug for Segment<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "Literal({text:?})"),
            Segment::Interpolated(block) => write!(f, "Interpolated({block:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn as_literal() {
        let seg: Segment<u32> = Segment::Literal("hi".to_string());
        assert_eq!(seg.as_literal(), Some("hi"));
        let seg: Segment<u32> = Segment::Interpolated(3);
        assert_eq!(seg.as_literal(), None);
    }

    #[test]
    fn is_interpolated() {
        let seg: Segment<u32> = Segment::Interpolated(1);
        assert!(seg.is_interpolated());
        assert!(!Segment::<u32>::Literal(String::new()).is_interpolated());
    }

    #[test]
    fn debug_rendering() {
        let seg: Segment<u32> = Segment::Literal("a\nb".to_string());
        assert_eq!(format!("{seg:?}"), "Literal(\"a\\nb\")");
    }
}
