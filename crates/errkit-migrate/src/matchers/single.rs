use super::template::{Placeholder, Template, join_static, strip_enclosing};
use super::{Matcher, Rewrite};
use crate::naming::infer_label;

/// A message with exactly one `%s` or `%v` and one value.
///
/// The label comes from the text before the placeholder; the message is the
/// surrounding text with the placeholder removed.
pub struct SinglePlaceholderMatcher;

impl Matcher for SinglePlaceholderMatcher {
    fn name(&self) -> &'static str {
        "single-placeholder"
    }

    fn arity(&self) -> usize {
        2
    }

    fn match_shape(&self, args: &[&str]) -> Option<Rewrite> {
        let template = Template::parse(args[0])?;
        let value = args[1];
        if value.is_empty() {
            return None;
        }

        let placeholder = template.exact_placeholders(1, Placeholder::is_plain_value)?[0];
        let (before, after) = strip_enclosing(
            &template.text[..placeholder.start],
            &template.text[placeholder.end..],
        );
        if before.trim().is_empty() {
            return None;
        }

        let label = infer_label(before, value)?;
        Some(Rewrite::new(join_static(before, after)).field(label, value))
    }
}
