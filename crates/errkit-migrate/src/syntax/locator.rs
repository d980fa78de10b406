use crate::error::{ParseError, ParseResult};

use super::literal::{is_quote, skip_literal};

/// Byte span of one legacy call inside a line, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationSpan {
    pub start: usize,
    pub end: usize,
}

/// A located legacy call, borrowing from the line it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub span: InvocationSpan,
    /// Function name after the namespace, e.g. `Wrapf`.
    pub function: &'a str,
    /// Text strictly between the outer parentheses.
    pub interior: &'a str,
}

impl<'a> Invocation<'a> {
    /// Everything before the call.
    pub fn prefix(&self, line: &'a str) -> &'a str {
        &line[..self.span.start]
    }

    /// Everything after the call.
    pub fn suffix(&self, line: &'a str) -> &'a str {
        &line[self.span.end..]
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Find the first legacy call in `line`.
///
/// `prefix` is the namespace including the dot, e.g. `errors.`. Returns
/// `Ok(None)` when the line holds no call in that namespace. Occurrences
/// inside string literals, occurrences glued to a longer identifier
/// (`myerrors.`) and non-call references (`errors.ErrFoo`) are skipped.
pub fn locate_invocation<'a>(line: &'a str, prefix: &str) -> ParseResult<Option<Invocation<'a>>> {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if is_quote(byte) {
            match skip_literal(line, i) {
                Ok(next) => {
                    i = next;
                    continue;
                }
                // An open literal before any call: nothing callable follows.
                Err(_) => return Ok(None),
            }
        }

        if bytes[i..].starts_with(prefix.as_bytes()) && (i == 0 || !is_ident_byte(bytes[i - 1])) {
            if let Some(open) = call_paren(line, i + prefix.len()) {
                let end = matching_paren(line, open)?;
                return Ok(Some(Invocation {
                    span: InvocationSpan { start: i, end },
                    function: line[i + prefix.len()..open].trim_end(),
                    interior: &line[open + 1..end - 1],
                }));
            }
            i += prefix.len();
            continue;
        }

        i += 1;
    }

    Ok(None)
}

/// Offset of the `(` that opens the call whose name starts at `name_start`.
fn call_paren(line: &str, name_start: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = name_start;
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    (i < bytes.len() && bytes[i] == b'(').then_some(i)
}

/// Offset just past the `)` matching the `(` at `open`.
fn matching_paren(line: &str, open: usize) -> ParseResult<usize> {
    let bytes = line.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            b if is_quote(b) => {
                i = skip_literal(line, i)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    Err(ParseError::UnclosedCall { open })
}
