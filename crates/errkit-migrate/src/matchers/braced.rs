use once_cell::sync::Lazy;
use regex::Regex;

use super::{Matcher, Rewrite};
use crate::naming::label_from_word;

static BRACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^{}"\\%]*)\{(\w+):?\s+%s,\s+(\w+):?\s+%s\}"$"#).expect("valid braced regex")
});

/// `"Could not get Statefulset{Namespace %s, Name: %s}"` with two values.
///
/// The keys inside the braces name the values.
pub struct BracedPairMatcher;

impl Matcher for BracedPairMatcher {
    fn name(&self) -> &'static str {
        "braced-pair"
    }

    fn arity(&self) -> usize {
        3
    }

    fn match_shape(&self, args: &[&str]) -> Option<Rewrite> {
        let caps = BRACED.captures(args[0])?;
        let message = caps.get(1)?.as_str().trim();
        if message.is_empty() {
            return None;
        }

        let first = label_from_word(caps.get(2)?.as_str(), args[1])?;
        let second = label_from_word(caps.get(3)?.as_str(), args[2])?;
        if first == second {
            return None;
        }

        Some(Rewrite::new(message).field(first, args[1]).field(second, args[2]))
    }
}
