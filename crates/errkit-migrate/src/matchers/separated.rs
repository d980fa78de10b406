use super::template::{Placeholder, Template, join_static};
use super::{Matcher, Rewrite};
use crate::naming::label_from_expression;

const SEPARATORS: &[&str] = &[":", "/"];

/// `"... %s:%s ..."` or `"... %s/%s ..."`, typically namespace and name.
///
/// There are no words to name either value, so labels come from the value
/// expressions.
pub struct SeparatedPairMatcher;

impl Matcher for SeparatedPairMatcher {
    fn name(&self) -> &'static str {
        "separated-pair"
    }

    fn arity(&self) -> usize {
        3
    }

    fn match_shape(&self, args: &[&str]) -> Option<Rewrite> {
        let template = Template::parse(args[0])?;
        let placeholders = template.exact_placeholders(2, Placeholder::is_plain_string)?;
        let (first, second) = (placeholders[0], placeholders[1]);

        let between = template.text[first.end..second.start].trim();
        if !SEPARATORS.contains(&between) {
            return None;
        }

        let before = template.text[..first.start]
            .trim_end()
            .trim_end_matches(&[':', '/'][..])
            .trim_end();
        if before.is_empty() {
            return None;
        }
        let after = &template.text[second.end..];

        let first_label = label_from_expression(args[1])?;
        let second_label = label_from_expression(args[2])?;
        if first_label == second_label {
            return None;
        }

        Some(
            Rewrite::new(join_static(before, after))
                .field(first_label, args[1])
                .field(second_label, args[2]),
        )
    }
}
