//! Escape sequence decoding.
//!
//! Decodes exactly one escape form from a cursor positioned at the scalar
//! immediately following an unescaped backslash. Each context (quoted or
//! multi-line literal) feeds this same decoder; what differs per context
//! is raw-newline handling, which lives in the scanner.
//!
//! Recognized forms:
//! - `\n` `\t` `\r` `\\` `\"` `` \` `` — single replacement scalar
//! - `\$` — literal `$`; `\${` — the two-scalar sequence `$` `{`,
//!   suppressing interpolation
//! - `\xNN` (2 hex digits), `\uNNNN` (4), `\UNNNNNNNN` (8, `<= 0x10FFFF`)
//! - backslash at end of line — line continuation

use sera_ir::Span;

use crate::scan_error::ScanError;
use crate::Cursor;

/// Result of decoding one escape form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EscapeResult {
    /// A single decoded scalar value.
    Scalar(char),
    /// Backslash before a line break: the scanner discards the break and
    /// the continued line's leading horizontal whitespace.
    LineContinuation,
    /// The `\${` sequence: emit literal `$` `{` without starting an
    /// interpolation.
    LiteralDollarBrace,
}

/// Decode one escape form.
///
/// # Contract
///
/// `cursor` sits on the scalar immediately after the backslash, which the
/// caller has already verified is within the input. On success the
/// returned cursor sits just past the consumed form; for
/// `LineContinuation` that is just past the line break, and the caller
/// performs the whitespace skip.
pub fn decode_escape(cursor: Cursor<'_>) -> Result<(EscapeResult, Cursor<'_>), ScanError> {
    let mut cur = cursor;
    let backslash = cur.pos().saturating_sub(1);
    let marker = cur.current();
    match marker {
        'n' => single(cur, '\n'),
        't' => single(cur, '\t'),
        'r' => single(cur, '\r'),
        '\\' => single(cur, '\\'),
        '"' => single(cur, '"'),
        '`' => single(cur, '`'),
        '$' => {
            cur.advance();
            if cur.current() == '{' {
                cur.advance();
                Ok((EscapeResult::LiteralDollarBrace, cur))
            } else {
                Ok((EscapeResult::Scalar('$'), cur))
            }
        }
        'x' => hex_escape(cur, backslash, 2),
        'u' => hex_escape(cur, backslash, 4),
        'U' => hex_escape(cur, backslash, 8),
        '\n' => {
            cur.advance();
            Ok((EscapeResult::LineContinuation, cur))
        }
        '\r' if cur.peek() == '\n' => {
            cur.advance_n(2);
            Ok((EscapeResult::LineContinuation, cur))
        }
        other => Err(ScanError::invalid_escape_sequence(
            offending_span(backslash, &cur),
            other,
        )),
    }
}

/// Consume the marker and yield its replacement scalar.
fn single(mut cur: Cursor<'_>, replacement: char) -> Result<(EscapeResult, Cursor<'_>), ScanError> {
    cur.advance();
    Ok((EscapeResult::Scalar(replacement), cur))
}

/// Decode a fixed-width hex escape: the marker (`x`/`u`/`U`) followed by
/// exactly `digit_count` hex digits.
fn hex_escape(
    mut cur: Cursor<'_>,
    backslash: u32,
    digit_count: u32,
) -> Result<(EscapeResult, Cursor<'_>), ScanError> {
    let marker = cur.current();
    cur.advance();
    let mut value: u32 = 0;
    for _ in 0..digit_count {
        let Some(digit) = cur.current().to_digit(16) else {
            // Wrong digit count or a non-hex scalar (possibly the closing
            // delimiter or EOF).
            return Err(ScanError::invalid_escape_sequence(
                offending_span(backslash, &cur),
                marker,
            ));
        };
        value = value * 16 + digit;
        cur.advance();
    }
    if value > 0x0010_FFFF {
        return Err(ScanError::invalid_escape_sequence(
            Span::new(backslash, cur.pos()),
            marker,
        ));
    }
    // Surrogate code points (0xD800..=0xDFFF) are not scalar values.
    let Some(scalar) = char::from_u32(value) else {
        return Err(ScanError::invalid_escape_sequence(
            Span::new(backslash, cur.pos()),
            marker,
        ));
    };
    Ok((EscapeResult::Scalar(scalar), cur))
}

/// Span from the backslash through the scalar under the cursor.
fn offending_span(backslash: u32, cur: &Cursor<'_>) -> Span {
    let end = if cur.is_eof() {
        cur.pos()
    } else {
        cur.pos() + 1
    };
    Span::new(backslash, end)
}
