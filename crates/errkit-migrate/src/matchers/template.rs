use crate::syntax::is_single_string_literal;

/// A formatting verb inside a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the `%` within the template text.
    pub start: usize,
    /// Byte offset just past the verb.
    pub end: usize,
    /// The verb character (`s`, `v`, `d`, ...); `%` for an escaped percent.
    pub verb: char,
}

impl Placeholder {
    /// `%s` exactly, with no flags, width or precision.
    pub fn is_plain_string(&self) -> bool {
        self.verb == 's' && self.end - self.start == 2
    }

    /// `%s` or `%v` exactly.
    pub fn is_plain_value(&self) -> bool {
        matches!(self.verb, 's' | 'v') && self.end - self.start == 2
    }
}

/// The text of a double-quoted template literal, quotes excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'a> {
    pub text: &'a str,
}

impl<'a> Template<'a> {
    /// Accepts only an argument that is one complete `"..."` literal.
    pub fn parse(arg: &'a str) -> Option<Self> {
        is_single_string_literal(arg).then(|| Self {
            text: &arg[1..arg.len() - 1],
        })
    }

    /// All formatting directives, in order.
    ///
    /// Flags, width and precision (`%-5.2f`) are folded into the directive;
    /// `%%` is reported with verb `%` so that callers can refuse it.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let bytes = self.text.as_bytes();
        let mut found = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            let start = i;
            i += 1;
            while i < bytes.len() && matches!(bytes[i], b'+' | b'-' | b'#' | b' ' | b'0'..=b'9' | b'.') {
                i += 1;
            }
            if i < bytes.len() && bytes[i].is_ascii() {
                found.push(Placeholder {
                    start,
                    end: i + 1,
                    verb: bytes[i] as char,
                });
                i += 1;
            } else {
                // Dangling `%` at the end or before a non-ASCII char.
                found.push(Placeholder {
                    start,
                    end: i,
                    verb: '!',
                });
            }
        }

        found
    }

    /// The placeholders when there are exactly `count` and all satisfy `accept`.
    pub fn exact_placeholders(
        &self,
        count: usize,
        accept: impl Fn(&Placeholder) -> bool,
    ) -> Option<Vec<Placeholder>> {
        let placeholders = self.placeholders();
        (placeholders.len() == count && placeholders.iter().all(accept)).then_some(placeholders)
    }
}

/// Join the static text around removed placeholders with a single space.
pub fn join_static(before: &str, after: &str) -> String {
    let before = before.trim();
    let after = after.trim();
    match (before.is_empty(), after.is_empty()) {
        (_, true) => before.to_string(),
        (true, false) => after.to_string(),
        (false, false) => format!("{before} {after}"),
    }
}

/// Drop a bracket pair left around a removed placeholder, as in `{%s}`.
pub fn strip_enclosing<'t>(before: &'t str, after: &'t str) -> (&'t str, &'t str) {
    const PAIRS: &[(char, char)] = &[('{', '}'), ('(', ')'), ('[', ']'), ('<', '>')];

    let (head, tail) = (before.trim_end(), after.trim_start());
    for &(open, close) in PAIRS {
        if let (Some(head), Some(tail)) = (head.strip_suffix(open), tail.strip_prefix(close)) {
            return (head, tail);
        }
    }
    (before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template() {
        assert_eq!(Template::parse(r#""Failed %s""#).unwrap().text, "Failed %s");
        assert!(Template::parse("msg").is_none());
        assert!(Template::parse(r#""a" + b"#).is_none());
        assert!(Template::parse("`raw %s`").is_none());
    }

    #[test]
    fn test_placeholders() {
        let template = Template::parse(r#""PVC %s:%v has %d items, %-5.2f%%""#).unwrap();
        let verbs: Vec<char> = template.placeholders().iter().map(|p| p.verb).collect();
        assert_eq!(verbs, vec!['s', 'v', 'd', 'f', '%']);

        let placeholders = template.placeholders();
        assert!(placeholders[0].is_plain_string());
        assert!(placeholders[1].is_plain_value());
        assert!(!placeholders[1].is_plain_string());
        assert!(!placeholders[3].is_plain_value());
        assert_eq!(&template.text[placeholders[0].start..placeholders[0].end], "%s");
    }

    #[test]
    fn test_dangling_percent() {
        let template = Template::parse(r#""100%""#).unwrap();
        assert_eq!(template.placeholders()[0].verb, '!');
    }

    #[test]
    fn test_exact_placeholders() {
        let template = Template::parse(r#""%s %s""#).unwrap();
        assert!(template.exact_placeholders(2, Placeholder::is_plain_string).is_some());
        assert!(template.exact_placeholders(1, Placeholder::is_plain_string).is_none());

        let template = Template::parse(r#""Namespace: %s, Replicas: %d""#).unwrap();
        assert!(template.exact_placeholders(2, Placeholder::is_plain_string).is_none());
    }

    #[test]
    fn test_join_static() {
        assert_eq!(join_static("Failed to validate if PVC ", " exists"), "Failed to validate if PVC exists");
        assert_eq!(join_static("Failed to get PV ", ""), "Failed to get PV");
        assert_eq!(join_static("", "failed"), "failed");
    }

    #[test]
    fn test_strip_enclosing() {
        assert_eq!(strip_enclosing("version {", "}"), ("version ", ""));
        assert_eq!(strip_enclosing("pod (", ") missing"), ("pod ", " missing"));
        assert_eq!(strip_enclosing("pod {", ") missing"), ("pod {", ") missing"));
        assert_eq!(strip_enclosing("Failed to get PV ", ""), ("Failed to get PV ", ""));
    }
}
