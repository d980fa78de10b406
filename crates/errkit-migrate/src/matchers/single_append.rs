use once_cell::sync::Lazy;
use regex::Regex;

use super::{Matcher, Rewrite};
use crate::naming::infer_label;

static APPEND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^"\\]+?)\s*:\s*"\s*\+\s*([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)$"#)
        .expect("valid append regex")
});

/// `"prefix: " + value` concatenation.
///
/// The value must be a plain identifier or a dotted selector; calls and
/// further concatenations are left alone.
pub struct SingleAppendMatcher;

impl Matcher for SingleAppendMatcher {
    fn name(&self) -> &'static str {
        "single-append"
    }

    fn arity(&self) -> usize {
        1
    }

    fn match_shape(&self, args: &[&str]) -> Option<Rewrite> {
        let caps = APPEND.captures(args[0])?;
        let message = caps.get(1)?.as_str().trim();
        let value = caps.get(2)?.as_str();
        if message.is_empty() {
            return None;
        }
        let label = infer_label(message, value)?;
        Some(Rewrite::new(message).field(label, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_with_colon() {
        let rewrite = SingleAppendMatcher
            .try_match(&[r#""failed to read env from dir: " + dirName"#])
            .unwrap();
        assert_eq!(rewrite, Rewrite::new("failed to read env from dir").field("dir", "dirName"));
    }

    #[test]
    fn test_append_selector_value() {
        let rewrite = SingleAppendMatcher
            .try_match(&[r#""Invalid volume type:"+ opts.Type"#])
            .unwrap();
        assert_eq!(rewrite, Rewrite::new("Invalid volume type").field("volumeType", "opts.Type"));
    }

    #[test]
    fn test_append_declines() {
        // No colon before the closing quote.
        assert!(SingleAppendMatcher.try_match(&[r#""failed " + name"#]).is_none());
        // Call expressions and chains are not plain values.
        assert!(SingleAppendMatcher.try_match(&[r#""failed: " + f(x)"#]).is_none());
        assert!(SingleAppendMatcher.try_match(&[r#""a: " + b + "c""#]).is_none());
        // Two arguments.
        assert!(SingleAppendMatcher.try_match(&[r#""a: " + b"#, "c"]).is_none());
        // Nothing before the colon.
        assert!(SingleAppendMatcher.try_match(&[r#"": " + b"#]).is_none());
    }
}
