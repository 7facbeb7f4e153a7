use pretty_assertions::assert_eq;

use sera_ir::{Segment, Span};

use super::*;
use crate::scan_error::{BlockFailure, ScanErrorKind};
use crate::SourceBuffer;

/// Minimal statement-block stub: collects the block's raw source text,
/// re-entering the literal scanner for every nested string literal so
/// interpolation boundaries are found the same way the real parser would
/// find them.
struct StubParser;

impl BlockParser for StubParser {
    type Block = String;

    fn parse_block<'a>(
        &mut self,
        stack: &mut ModeStack,
        cursor: Cursor<'a>,
    ) -> Result<(String, Cursor<'a>), BlockError> {
        let mut cur = cursor;
        let start = cur.pos();
        let mut depth = 0u32;
        loop {
            if cur.is_eof() {
                // No unmatched `}` in the rest of the input: report where
                // we stopped and let the composer flag it.
                return Ok((cur.slice_from(start), cur));
            }
            match cur.current() {
                '{' => {
                    depth += 1;
                    cur.advance();
                }
                '}' if depth == 0 => return Ok((cur.slice_from(start), cur)),
                '}' => {
                    depth -= 1;
                    cur.advance();
                }
                '"' => {
                    cur.advance();
                    let lit = scan_string_literal(stack, self, cur, DelimKind::DoubleQuoted)?;
                    cur = lit.end;
                }
                '`' => {
                    cur.advance();
                    let lit = scan_string_literal(stack, self, cur, DelimKind::BacktickMultiline)?;
                    cur = lit.end;
                }
                _ => cur.advance(),
            }
        }
    }
}

/// Stub that always reports its own parse failure.
struct FailingParser;

impl BlockParser for FailingParser {
    type Block = String;

    fn parse_block<'a>(
        &mut self,
        _stack: &mut ModeStack,
        cursor: Cursor<'a>,
    ) -> Result<(String, Cursor<'a>), BlockError> {
        Err(BlockError::Parse(BlockFailure {
            message: "unexpected token `;`".to_string(),
            span: Span::point(cursor.pos()),
        }))
    }
}

/// Helper: scan a full literal (source starts at its opening delimiter)
/// with a fresh default stack; asserts the stack is balanced afterwards.
fn scan(source: &str) -> Result<(Vec<Segment<String>>, u32), ScanError> {
    let mut stack = ModeStack::new();
    scan_with(source, &mut stack)
}

fn scan_with(source: &str, stack: &mut ModeStack) -> Result<(Vec<Segment<String>>, u32), ScanError> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let delim = match cursor.current() {
        '"' => DelimKind::DoubleQuoted,
        '`' => DelimKind::BacktickMultiline,
        other => panic!("test source must start with a delimiter, got {other:?}"),
    };
    cursor.advance();
    let mut parser = StubParser;
    let result = scan_string_literal(stack, &mut parser, cursor, delim);
    assert_eq!(stack.depth(), 0, "stack must be balanced after scan");
    result.map(|lit| (lit.segments, lit.end.pos()))
}

/// Helper: scan a literal expected to be a single decoded text run.
fn scan_text(source: &str) -> String {
    let (segments, _) = scan(source).unwrap();
    assert_eq!(segments.len(), 1, "expected one segment for {source:?}");
    segments[0].as_literal().unwrap().to_string()
}

fn scan_err(source: &str) -> ScanErrorKind {
    match scan(source) {
        Ok(result) => panic!("expected scan of {source:?} to fail, got {result:?}"),
        Err(e) => e.kind,
    }
}

// === Plain Text Round Trips ===

#[test]
fn plain_quoted_round_trip() {
    assert_eq!(scan_text("\"hello, world!\""), "hello, world!");
}

#[test]
fn empty_literal_owns_one_empty_segment() {
    let (segments, end) = scan("\"\"").unwrap();
    assert_eq!(segments, vec![Segment::Literal(String::new())]);
    assert_eq!(end, 2);
}

#[test]
fn end_cursor_sits_after_closing_delimiter() {
    let (_, end) = scan("\"ab\" + rest").unwrap();
    assert_eq!(end, 4);
}

#[test]
fn multiline_preserves_newlines_and_indentation() {
    assert_eq!(
        scan_text("`line one\n    line two\n`"),
        "line one\n    line two\n"
    );
}

#[test]
fn multiline_preserves_crlf_verbatim() {
    assert_eq!(scan_text("`a\r\nb`"), "a\r\nb");
}

#[test]
fn double_quote_is_plain_text_inside_multiline() {
    assert_eq!(scan_text("`say \"hi\"`"), "say \"hi\"");
}

#[test]
fn multibyte_scalars_scan_as_single_units() {
    let (segments, end) = scan("\"é😀${x}\"").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("é😀".to_string()),
            Segment::Interpolated("x".to_string()),
        ]
    );
    assert_eq!(end, 8);
}

#[test]
fn interior_null_is_ordinary_content() {
    assert_eq!(scan_text("\"a\0b\""), "a\0b");
}

// === Escapes ===

#[test]
fn escapes_decode_inside_literal() {
    assert_eq!(
        scan_text("\"\\x40\\u2764 \\U0001F603\\n\""),
        "@\u{2764} \u{1F603}\n"
    );
}

#[test]
fn escaped_quote_does_not_terminate() {
    assert_eq!(scan_text("\"a\\\"b\""), "a\"b");
}

#[test]
fn escaped_backtick_does_not_terminate_multiline() {
    assert_eq!(scan_text("`a\\`b`"), "a`b");
}

#[test]
fn escaped_dollar_brace_suppresses_interpolation() {
    let (segments, _) = scan("\"\\${s}\"").unwrap();
    assert_eq!(segments, vec![Segment::Literal("${s}".to_string())]);
}

#[test]
fn escaped_dollar_without_brace_is_dollar() {
    assert_eq!(scan_text("\"\\$5\""), "$5");
}

#[test]
fn invalid_escape_carries_literal_context() {
    let err = match scan("\"ab\\q\"") {
        Err(e) => e,
        Ok(r) => panic!("expected error, got {r:?}"),
    };
    assert_eq!(
        err.kind,
        ScanErrorKind::InvalidEscapeSequence { escape_char: 'q' }
    );
    assert_eq!(
        err.context,
        ScanErrorContext::InsideLiteral {
            start: 0,
            delim: DelimKind::DoubleQuoted
        }
    );
    assert_eq!(err.span, Span::new(3, 5));
}

// === Line Continuation ===

#[test]
fn continuation_discards_break_and_indentation() {
    assert_eq!(scan_text("\"a \\\n   b\""), "a b");
}

#[test]
fn continuation_with_tabs() {
    assert_eq!(scan_text("\"a \\\n\t\t b\""), "a b");
}

#[test]
fn continuation_with_crlf() {
    assert_eq!(scan_text("\"a \\\r\n   b\""), "a b");
}

#[test]
fn continuation_with_no_indentation() {
    assert_eq!(scan_text("\"a \\\nb\""), "a b");
}

#[test]
fn continuation_inserts_nothing() {
    // Spacing intended in the output must precede the backslash.
    assert_eq!(scan_text("\"ab\\\n   cd\""), "abcd");
}

#[test]
fn continuation_works_inside_multiline() {
    assert_eq!(scan_text("`a \\\n   b`"), "a b");
}

// === Interpolation ===

#[test]
fn single_interpolation() {
    let (segments, end) = scan("\"a${x}b\"").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("a".to_string()),
            Segment::Interpolated("x".to_string()),
            Segment::Literal("b".to_string()),
        ]
    );
    assert_eq!(end, 8);
}

#[test]
fn interpolation_only_has_no_empty_text_segments() {
    let (segments, _) = scan("\"${x}\"").unwrap();
    assert_eq!(segments, vec![Segment::Interpolated("x".to_string())]);
}

#[test]
fn multiple_interpolations() {
    let (segments, _) = scan("\"a${x}b${y}c\"").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("a".to_string()),
            Segment::Interpolated("x".to_string()),
            Segment::Literal("b".to_string()),
            Segment::Interpolated("y".to_string()),
            Segment::Literal("c".to_string()),
        ]
    );
}

#[test]
fn nested_braces_belong_to_the_block() {
    let (segments, _) = scan("\"v=${ {a: 1} }!\"").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("v=".to_string()),
            Segment::Interpolated(" {a: 1} ".to_string()),
            Segment::Literal("!".to_string()),
        ]
    );
}

#[test]
fn nested_string_literal_inside_block() {
    let (segments, _) = scan(r#""out ${ "in ${ x } mid" } end""#).unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("out ".to_string()),
            Segment::Interpolated(r#" "in ${ x } mid" "#.to_string()),
            Segment::Literal(" end".to_string()),
        ]
    );
}

#[test]
fn nested_literal_may_use_line_continuation() {
    let source = "\"x${ \"a \\\n   b\" }y\"";
    let (segments, _) = scan(source).unwrap();
    assert_eq!(segments.len(), 3);
    assert!(segments[1].is_interpolated());
}

#[test]
fn multiline_block_inside_quoted_literal() {
    // The interpolated block may span lines even though the quoted
    // literal itself cannot.
    let (segments, _) = scan("\"a${ `x\ny` }b\"").unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::Literal("a".to_string()),
            Segment::Interpolated(" `x\ny` ".to_string()),
            Segment::Literal("b".to_string()),
        ]
    );
}

#[test]
fn lone_dollar_is_text() {
    assert_eq!(scan_text("\"a$b\""), "a$b");
    assert_eq!(scan_text("\"a$\""), "a$");
}

#[test]
fn lone_closing_brace_is_text() {
    assert_eq!(scan_text("\"a}b\""), "a}b");
}

// === Failures ===

#[test]
fn unterminated_quoted_literal() {
    assert_eq!(
        scan_err("\"abc"),
        ScanErrorKind::UnterminatedStringLiteral {
            delim: DelimKind::DoubleQuoted
        }
    );
}

#[test]
fn unterminated_multiline_literal() {
    assert_eq!(
        scan_err("`abc\ndef"),
        ScanErrorKind::UnterminatedStringLiteral {
            delim: DelimKind::BacktickMultiline
        }
    );
}

#[test]
fn quoted_literal_raw_newline_fails() {
    assert_eq!(
        scan_err("\"ab\ncd\""),
        ScanErrorKind::UnterminatedStringLiteral {
            delim: DelimKind::DoubleQuoted
        }
    );
}

#[test]
fn trailing_backslash_at_eof_fails() {
    assert_eq!(
        scan_err("\"ab\\"),
        ScanErrorKind::UnterminatedStringLiteral {
            delim: DelimKind::DoubleQuoted
        }
    );
}

#[test]
fn unterminated_interpolation() {
    let err = match scan("\"a${x") {
        Err(e) => e,
        Ok(r) => panic!("expected error, got {r:?}"),
    };
    assert_eq!(err.kind, ScanErrorKind::UnterminatedInterpolation);
    assert_eq!(err.span, Span::new(2, 5));
}

#[test]
fn parser_failure_is_wrapped_once() {
    let buf = SourceBuffer::new("\"a${;}b\"");
    let mut cursor = buf.cursor();
    cursor.advance();
    let mut stack = ModeStack::new();
    let mut parser = FailingParser;
    let err = match scan_string_literal(&mut stack, &mut parser, cursor, DelimKind::DoubleQuoted) {
        Err(e) => e,
        Ok(r) => panic!("expected error, got {:?}", r.segments),
    };
    assert_eq!(stack.depth(), 0);
    assert_eq!(
        err.kind,
        ScanErrorKind::InterpolationParseError {
            cause: BlockFailure {
                message: "unexpected token `;`".to_string(),
                span: Span::point(4),
            }
        }
    );
    assert_eq!(
        err.context,
        ScanErrorContext::InsideInterpolation { start: 2, depth: 2 }
    );
}

// === Nesting Depth ===

#[test]
fn depth_guard_trips_past_limit() {
    // "${"${x}"}" peaks at depth 4: literal, interpolation, literal,
    // interpolation.
    let mut stack = ModeStack::with_limit(3);
    let err = match scan_with("\"${\"${x}\"}\"", &mut stack) {
        Err(e) => e,
        Ok(r) => panic!("expected error, got {r:?}"),
    };
    assert_eq!(err.kind, ScanErrorKind::MaxNestingExceeded { limit: 3 });
}

#[test]
fn depth_within_limit_succeeds() {
    let mut stack = ModeStack::with_limit(4);
    let (segments, _) = scan_with("\"${\"${x}\"}\"", &mut stack).unwrap();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_interpolated());
}

#[test]
fn deeply_nested_input_fails_cleanly() {
    // 20 literal/interpolation rounds against a limit of 16: the guard
    // trips long before any call-stack concern.
    let mut source = String::new();
    for _ in 0..20 {
        source.push_str("\"${");
    }
    source.push('x');
    for _ in 0..20 {
        source.push_str("}\"");
    }
    let mut stack = ModeStack::with_limit(16);
    let err = match scan_with(&source, &mut stack) {
        Err(e) => e,
        Ok(r) => panic!("expected error, got {r:?}"),
    };
    assert_eq!(err.kind, ScanErrorKind::MaxNestingExceeded { limit: 16 });
}

#[test]
fn default_limit_is_generous() {
    let stack = ModeStack::new();
    assert_eq!(stack.limit(), MAX_NESTING_DEPTH);
    assert_eq!(MAX_NESTING_DEPTH, 256);
}

#[test]
fn parse_string_literal_owns_its_stack() {
    let buf = SourceBuffer::new("\"a${x}b\"");
    let mut cursor = buf.cursor();
    cursor.advance();
    let mut parser = StubParser;
    let lit = parse_string_literal(&mut parser, cursor, DelimKind::DoubleQuoted).unwrap();
    assert_eq!(lit.segments.len(), 3);
}

// === Mode Stack ===

#[test]
fn fresh_stack_is_empty() {
    let stack = ModeStack::new();
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.top(), None);
}

#[test]
fn default_matches_new() {
    assert_eq!(ModeStack::default().limit(), ModeStack::new().limit());
}

// === Property Tests ===

mod proptest_roundtrip {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Any body free of escapes and interpolation decodes to exactly
        /// its source text.
        #[test]
        fn plain_quoted_bodies_round_trip(body in "[a-zA-Z0-9 .,!?:;<>()+=_-]*") {
            let source = format!("\"{body}\"");
            let buf = SourceBuffer::new(&source);
            let mut cursor = buf.cursor();
            cursor.advance();
            let mut stack = ModeStack::new();
            let mut parser = StubParser;
            let lit =
                scan_string_literal(&mut stack, &mut parser, cursor, DelimKind::DoubleQuoted)
                    .unwrap();
            prop_assert_eq!(stack.depth(), 0);
            prop_assert_eq!(lit.segments.len(), 1);
            prop_assert_eq!(lit.segments[0].as_literal(), Some(body.as_str()));
        }
    }
}
