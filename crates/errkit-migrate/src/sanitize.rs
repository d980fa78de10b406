//! Whitespace cleanup for rewritten messages.
//!
//! Removing a placeholder tends to leave doubled spaces or a space stranded
//! before punctuation (`"pod %s."` becomes `"pod ."`).

use once_cell::sync::Lazy;
use regex::Regex;

static REPEATED_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid regex"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +([.,])").expect("valid regex"));

/// Normalize spaces in a message.
///
/// 1. Leading and trailing spaces are trimmed (tabs and newlines are kept).
/// 2. Runs of spaces collapse to one.
/// 3. Spaces before `.` and `,` are removed.
pub fn sanitize_message(input: &str) -> String {
    let trimmed = input.trim_matches(' ');
    let single_spaced = REPEATED_SPACES.replace_all(trimmed, " ");
    SPACE_BEFORE_PUNCT
        .replace_all(&single_spaced, "$1")
        .into_owned()
}
