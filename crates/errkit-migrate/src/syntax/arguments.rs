use crate::error::{ParseError, ParseResult};

use super::literal::{is_quote, skip_literal};
use super::locator::Invocation;

/// A legacy call broken into its function name and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    pub function: &'a str,
    pub args: Vec<&'a str>,
}

impl<'a> Call<'a> {
    /// Decompose a located invocation.
    pub fn from_invocation(invocation: &Invocation<'a>) -> ParseResult<Self> {
        Ok(Self {
            function: invocation.function,
            args: split_arguments(invocation.interior)?,
        })
    }
}

/// Split call-interior text into its top-level arguments.
///
/// Commas nested in `()`, `[]`, `{}` or inside literals do not split. Each
/// argument is trimmed; a trailing empty argument (`a, b,`) is dropped.
pub fn split_arguments(interior: &str) -> ParseResult<Vec<&str>> {
    let bytes = interior.as_bytes();
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedDelimiter {
                        offset: i,
                        found: bytes[i] as char,
                    })?;
            }
            b',' if depth == 0 => {
                args.push(interior[start..i].trim());
                start = i + 1;
            }
            b if is_quote(b) => {
                i = skip_literal(interior, i)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    let last = interior[start..].trim();
    if !last.is_empty() {
        args.push(last);
    }

    Ok(args)
}
