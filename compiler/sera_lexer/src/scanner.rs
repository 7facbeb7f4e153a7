//! Literal-mode scanner and interpolation composer.
//!
//! Scans one string literal body into an ordered sequence of
//! [`Segment`]s, alternating decoded text runs with embedded blocks.
//! Interpolation boundaries cannot be found by brace counting on raw
//! text — the code inside `${ ... }` may contain nested string literals
//! with their own interpolations — so the composer delegates to the
//! embedding language's statement parser through the [`BlockParser`]
//! capability and resumes at the position the parser reports back.
//!
//! The capability may itself re-enter [`scan_string_literal`] for every
//! string literal it encounters inside a block, with the same
//! [`ModeStack`]. That mutual recursion is the reason the scanning state
//! is an explicit stack of modes rather than a single flag: each nesting
//! level pushes its own mode and pops it only when its own closing
//! delimiter is found at that level.

use smallvec::SmallVec;

use sera_ir::{Segment, Span};

use crate::scan_error::{BlockError, ScanError, ScanErrorContext};
use crate::{decode_escape, Cursor, EscapeResult};

/// Default nesting-depth limit for [`ModeStack::new`].
///
/// Each literal level and each interpolation level costs one entry, so
/// this admits 128 string-inside-interpolation-inside-string rounds —
/// far beyond anything but adversarial input.
pub const MAX_NESTING_DEPTH: u32 = 256;

/// String literal delimiter kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DelimKind {
    /// `"` — single-line unless continued with a trailing backslash.
    DoubleQuoted,
    /// `` ` `` — raw line breaks and indentation preserved verbatim.
    BacktickMultiline,
}

impl DelimKind {
    /// The closing delimiter scalar.
    #[inline]
    pub fn closing(self) -> char {
        match self {
            DelimKind::DoubleQuoted => '"',
            DelimKind::BacktickMultiline => '`',
        }
    }

    /// Whether raw line breaks are legal inside the literal body.
    #[inline]
    pub fn is_multiline(self) -> bool {
        matches!(self, DelimKind::BacktickMultiline)
    }
}

/// Scanning mode, one per nesting level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScanMode {
    /// Inside a literal body, consuming text and escapes.
    LiteralText(DelimKind),
    /// Inside `${ ... }`, where the embedded statement parser owns the
    /// cursor.
    InterpolationCode,
}

/// Explicit stack of scanning modes.
///
/// One instance per top-level parse; never process-wide. The depth of the
/// stack equals the current nesting depth of
/// string-inside-interpolation-inside-string, which makes the recursion
/// guard an explicit, testable quantity.
#[derive(Clone, Debug)]
pub struct ModeStack {
    modes: SmallVec<[ScanMode; 8]>,
    limit: u32,
}

impl ModeStack {
    /// Create a stack with the default depth limit
    /// ([`MAX_NESTING_DEPTH`]).
    pub fn new() -> Self {
        Self::with_limit(MAX_NESTING_DEPTH)
    }

    /// Create a stack with an explicit depth limit.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            modes: SmallVec::new(),
            limit,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> u32 {
        u32::try_from(self.modes.len()).unwrap_or(u32::MAX)
    }

    /// The configured depth limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The mode governing the next scalar, if any scan is active.
    pub fn top(&self) -> Option<ScanMode> {
        self.modes.last().copied()
    }

    /// Push a mode, failing with `MaxNestingExceeded` at the limit.
    fn push(&mut self, mode: ScanMode, at: u32) -> Result<(), ScanError> {
        if self.depth() >= self.limit {
            return Err(ScanError::max_nesting_exceeded(Span::point(at), self.limit));
        }
        self.modes.push(mode);
        Ok(())
    }

    fn pop(&mut self) -> Option<ScanMode> {
        self.modes.pop()
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded statement-parsing capability.
///
/// Implemented by the embedding language's parser (or a stub in tests).
/// The composer knows nothing about the grammar behind `${ ... }`; it
/// only relies on this contract.
pub trait BlockParser {
    /// Opaque handle to the parsed (or parsed-and-evaluated) block.
    type Block;

    /// Parse a statement block starting exactly at `cursor`.
    ///
    /// # Contract
    ///
    /// - Stop at the first `}` unmatched relative to the starting
    ///   nesting level and return the cursor positioned **on** that `}`
    ///   (the composer consumes it).
    /// - For every string literal encountered inside the block, re-enter
    ///   [`scan_string_literal`] with the `stack` passed here, so nested
    ///   literals share the same depth accounting.
    /// - Report own failures as [`BlockError::Parse`] (the composer wraps
    ///   them without alteration); hand nested scan errors back unchanged
    ///   as [`BlockError::Scan`].
    fn parse_block<'a>(
        &mut self,
        stack: &mut ModeStack,
        cursor: Cursor<'a>,
    ) -> Result<(Self::Block, Cursor<'a>), BlockError>;
}

/// A scanned string literal: its segments and the cursor just past the
/// closing delimiter.
#[derive(Debug)]
pub struct ScannedLiteral<'a, B> {
    /// Ordered segments, 1..N per literal.
    pub segments: Vec<Segment<B>>,
    /// Cursor positioned immediately after the closing delimiter.
    pub end: Cursor<'a>,
}

/// Scan one string literal with a caller-owned mode stack.
///
/// `cursor` sits just after the opening delimiter. Returns the literal's
/// segments and the cursor just after the closing delimiter. The stack is
/// balanced on every path, success or error.
pub fn scan_string_literal<'a, P: BlockParser>(
    stack: &mut ModeStack,
    parser: &mut P,
    cursor: Cursor<'a>,
    delim: DelimKind,
) -> Result<ScannedLiteral<'a, P::Block>, ScanError> {
    // The opening delimiter sits one scalar back (except for a cursor at
    // the very start of input, which only a stub harness would produce).
    let open = cursor.pos().saturating_sub(1);
    stack.push(ScanMode::LiteralText(delim), open)?;
    let result = scan_body(stack, parser, cursor, delim, open);
    let popped = stack.pop();
    debug_assert!(
        matches!(popped, Some(ScanMode::LiteralText(_))),
        "mode stack out of balance after literal scan"
    );
    result
}

/// Scan one string literal with a fresh default-limit stack.
///
/// Convenience entry point for callers parsing a single top-level
/// literal; nested invocations from inside a block must use
/// [`scan_string_literal`] with the shared stack instead.
pub fn parse_string_literal<'a, P: BlockParser>(
    parser: &mut P,
    cursor: Cursor<'a>,
    delim: DelimKind,
) -> Result<ScannedLiteral<'a, P::Block>, ScanError> {
    let mut stack = ModeStack::new();
    scan_string_literal(&mut stack, parser, cursor, delim)
}

/// The literal-body loop: text runs, escapes, and interpolation starts.
fn scan_body<'a, P: BlockParser>(
    stack: &mut ModeStack,
    parser: &mut P,
    mut cursor: Cursor<'a>,
    delim: DelimKind,
    open: u32,
) -> Result<ScannedLiteral<'a, P::Block>, ScanError> {
    let close = delim.closing();
    let context = ScanErrorContext::InsideLiteral { start: open, delim };
    let mut segments: Vec<Segment<P::Block>> = Vec::new();
    let mut text = String::new();

    loop {
        let c = cursor.current();
        if c == close {
            cursor.advance();
            // Flush the trailing text run. An empty literal still owns
            // one (empty) segment.
            if !text.is_empty() || segments.is_empty() {
                segments.push(Segment::Literal(text));
            }
            return Ok(ScannedLiteral {
                segments,
                end: cursor,
            });
        }
        match c {
            '\0' if cursor.is_eof() => {
                return Err(ScanError::unterminated_string_literal(
                    Span::new(open, cursor.pos()),
                    delim,
                ));
            }
            '\\' => {
                cursor.advance();
                if cursor.is_eof() {
                    return Err(ScanError::unterminated_string_literal(
                        Span::new(open, cursor.pos()),
                        delim,
                    ));
                }
                let (escape, after) =
                    decode_escape(cursor).map_err(|e| e.with_context(context))?;
                cursor = after;
                match escape {
                    EscapeResult::Scalar(ch) => text.push(ch),
                    EscapeResult::LiteralDollarBrace => {
                        text.push('$');
                        text.push('{');
                    }
                    EscapeResult::LineContinuation => {
                        // Discard the continued line's leading indentation;
                        // resume at its first non-whitespace scalar.
                        cursor.eat_whitespace();
                    }
                }
            }
            '\n' | '\r' => {
                if delim.is_multiline() {
                    text.push(c);
                    cursor.advance();
                } else {
                    return Err(ScanError::unterminated_string_literal(
                        Span::new(open, cursor.pos()),
                        delim,
                    ));
                }
            }
            '$' if cursor.peek() == '{' => {
                let dollar = cursor.pos();
                if !text.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut text)));
                }
                cursor.advance_n(2); // consume `${`
                let (block, after) = scan_interpolation(stack, parser, cursor, dollar)?;
                segments.push(Segment::Interpolated(block));
                cursor = after;
            }
            _ => {
                text.push(c);
                cursor.advance();
            }
        }
    }
}

/// Delegate one `${ ... }` region to the embedded statement parser.
///
/// `cursor` sits just after the `${`. The composer does not balance
/// braces inside the block — that is the parser's job — it only validates
/// the handoff: the returned cursor must sit on the closing `}` within
/// the input, which the composer then consumes.
fn scan_interpolation<'a, P: BlockParser>(
    stack: &mut ModeStack,
    parser: &mut P,
    cursor: Cursor<'a>,
    dollar: u32,
) -> Result<(P::Block, Cursor<'a>), ScanError> {
    stack.push(ScanMode::InterpolationCode, dollar)?;
    let depth = stack.depth();
    let context = ScanErrorContext::InsideInterpolation {
        start: dollar,
        depth,
    };

    let outcome = parser.parse_block(stack, cursor);
    let result = match outcome {
        Ok((block, mut end)) => {
            if end.is_eof() || end.current() != '}' {
                Err(
                    ScanError::unterminated_interpolation(Span::new(dollar, end.pos()))
                        .with_context(context),
                )
            } else {
                end.advance(); // consume the `}`
                Ok((block, end))
            }
        }
        Err(BlockError::Scan(nested)) => Err(*nested),
        Err(BlockError::Parse(cause)) => {
            let span = Span::new(dollar, cause.span.end.max(dollar));
            Err(ScanError::interpolation_parse_error(span, cause).with_context(context))
        }
    };

    let popped = stack.pop();
    debug_assert!(
        matches!(popped, Some(ScanMode::InterpolationCode)),
        "mode stack out of balance after interpolation"
    );
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
