use super::*;

#[test]
fn empty_source() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.cursor().is_eof());
}

#[test]
fn len_counts_scalars_not_bytes() {
    // Heart is 3 UTF-8 bytes, emoji is 4; each is one scalar.
    let buf = SourceBuffer::new("\u{2764} a \u{1F603}");
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.scalars(), ['\u{2764}', ' ', 'a', ' ', '\u{1F603}']);
}

#[test]
fn sentinel_terminates_content() {
    let buf = SourceBuffer::new("ab");
    let mut cursor = buf.cursor();
    cursor.advance_n(2);
    assert_eq!(cursor.current(), '\0');
    assert!(cursor.is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    assert_eq!(buf.len(), 3);
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), '\0');
    assert!(!cursor.is_eof());
}

#[test]
fn peek_safe_at_end() {
    let buf = SourceBuffer::new("x");
    let mut cursor = buf.cursor();
    cursor.advance();
    // At EOF, peek and peek2 read sentinel padding, never panic.
    assert_eq!(cursor.peek(), '\0');
    assert_eq!(cursor.peek2(), '\0');
}
