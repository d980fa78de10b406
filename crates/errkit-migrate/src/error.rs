//! Error types for locating and decomposing legacy calls.

use thiserror::Error;

/// Structural failures while scanning a line.
///
/// None of these are fatal: a line that fails to parse is passed through
/// verbatim. Offsets are byte offsets into the text that was being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quote was opened but the input ended before it was closed.
    #[error("unterminated string literal starting at byte {start}")]
    UnterminatedLiteral { start: usize },

    /// The call's opening parenthesis is never matched.
    #[error("unclosed call: no matching ')' for '(' at byte {open}")]
    UnclosedCall { open: usize },

    /// A closing bracket appeared with nothing open at top level.
    #[error("unbalanced delimiter '{found}' at byte {offset}")]
    UnbalancedDelimiter { offset: usize, found: char },
}

/// Result type for scanning operations.
pub type ParseResult<T> = Result<T, ParseError>;
