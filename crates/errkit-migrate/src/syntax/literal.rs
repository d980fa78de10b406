use crate::error::{ParseError, ParseResult};

/// Returns true for the characters that open a string or rune literal.
pub fn is_quote(byte: u8) -> bool {
    matches!(byte, b'"' | b'\'' | b'`')
}

/// Skip the literal whose opening quote sits at `start`.
///
/// Returns the offset just past the closing quote. A backslash escapes the
/// following byte and nothing else; there is no other escape handling.
/// Quotes are ASCII, so byte-wise scanning is safe on UTF-8 input.
pub fn skip_literal(text: &str, start: usize) -> ParseResult<usize> {
    let bytes = text.as_bytes();
    debug_assert!(start < bytes.len() && is_quote(bytes[start]));

    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }

    Err(ParseError::UnterminatedLiteral { start })
}

/// True when `text` is exactly one double-quoted literal, nothing more.
///
/// `"a" + b` and `"a" "b"` are rejected even though they start and end with
/// a quote.
pub fn is_single_string_literal(text: &str) -> bool {
    text.len() >= 2
        && text.starts_with('"')
        && matches!(skip_literal(text, 0), Ok(end) if end == text.len())
}
