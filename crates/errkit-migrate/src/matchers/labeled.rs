use once_cell::sync::Lazy;
use regex::Regex;

use super::{Matcher, Rewrite};
use crate::naming::label_from_word;

static LABELED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^"\\%]*?)\s*(\w+):?\s+%s,\s+(\w+):?\s+%s"$"#).expect("valid labeled regex")
});

/// `"Message. Key: %s, Key2: %s"` with two values.
pub struct LabeledPairMatcher;

impl Matcher for LabeledPairMatcher {
    fn name(&self) -> &'static str {
        "labeled-pair"
    }

    fn arity(&self) -> usize {
        3
    }

    fn match_shape(&self, args: &[&str]) -> Option<Rewrite> {
        let caps = LABELED.captures(args[0])?;
        let message = caps.get(1)?.as_str().trim();

        let first = label_from_word(caps.get(2)?.as_str(), args[1])?;
        let second = label_from_word(caps.get(3)?.as_str(), args[2])?;
        if first == second {
            return None;
        }

        Some(Rewrite::new(message).field(first, args[1]).field(second, args[2]))
    }
}
