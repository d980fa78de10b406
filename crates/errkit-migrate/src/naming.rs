//! Label inference for positional placeholders.
//!
//! When a message such as `"Failed to get PVC %s"` carries no explicit key,
//! a label is guessed from the words in front of the placeholder and, failing
//! that, from the substituted expression itself.
//!
//! Resolution order:
//!
//! 1. `<Noun> ID` / `<Noun> with ID` at the end of the static text gives `<noun>ID`.
//! 2. The last word of the static text, adjusted by [`WORD_RULES`].
//! 3. The last dotted segment of the variable expression.
//!
//! Any candidate equal to a [`WordRule::Reject`] word is refused, so
//! inference can fail; callers must treat `None` as a decline.

use once_cell::sync::Lazy;
use regex::Regex;

/// How a particular trailing word is turned into a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRule {
    /// Too generic on its own: join with the word before (`volume type` -> `volumeType`).
    CombineWithPrevious,
    /// A verb, not a noun: use the word before instead (`PV create` -> `PV`).
    UsePrevious,
    /// Filler: ignore the static text and name the value after its expression.
    UseExpression,
    /// Never a label, from any source.
    Reject,
}

/// Special-cased words, compared case-insensitively.
pub const WORD_RULES: &[(&str, WordRule)] = &[
    ("type", WordRule::CombineWithPrevious),
    ("name", WordRule::CombineWithPrevious),
    ("create", WordRule::UsePrevious),
    ("got", WordRule::UseExpression),
    ("uninstall", WordRule::Reject),
];

/// Look up the rule for `word`, if it is special-cased.
pub fn word_rule(word: &str) -> Option<WordRule> {
    WORD_RULES
        .iter()
        .find(|(w, _)| w.eq_ignore_ascii_case(word))
        .map(|(_, rule)| *rule)
}

fn is_rejected(label: &str) -> bool {
    word_rule(label) == Some(WordRule::Reject)
}

static ID_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S\s+([A-Za-z_][A-Za-z0-9_]*)\s+(?:with\s+)?ID$").expect("valid ID regex")
});

const BRACKETS: &[char] = &['(', ')', '[', ']', '{', '}', '<', '>'];
const TRAILING_SEPARATORS: &[char] = &[':', '/', ',', ';', '.', '='];

/// Strip surrounding brackets and trailing separator punctuation.
pub fn clean_word(word: &str) -> &str {
    word.trim_matches(BRACKETS)
        .trim_end_matches(TRAILING_SEPARATORS)
        .trim_matches(BRACKETS)
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Lowercase the first letter unless the word opens with an acronym.
///
/// `Namespace` -> `namespace`, `PVC` -> `PVC`, `PVCName` -> `PVCName`.
pub fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            if first.is_uppercase() && chars.next().is_some_and(char::is_uppercase) {
                return word.to_string();
            }
            first.to_lowercase().chain(word.chars().skip(1)).collect()
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Infer a label for a placeholder.
///
/// `fragment` is the static text right before the placeholder and `expr` the
/// expression substituted for it.
pub fn infer_label(fragment: &str, expr: &str) -> Option<String> {
    if let Some(label) = label_from_id_noun(fragment) {
        return Some(label);
    }

    let words: Vec<&str> = fragment
        .split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .collect();
    let (previous, last) = match words.as_slice() {
        [] => (None, None),
        [.., previous, last] => (Some(*previous), Some(*last)),
        [last] => (None, Some(*last)),
    };

    last.and_then(|last| label_from_words(previous, last))
        .or_else(|| label_from_expression(expr))
}

/// Label from an explicitly declared key such as `Namespace` in
/// `"Namespace: %s"`. Falls back to the expression when the key itself is
/// unusable.
pub fn label_from_word(word: &str, expr: &str) -> Option<String> {
    label_from_words(None, clean_word(word)).or_else(|| label_from_expression(expr))
}

/// Label derived from the last dotted segment of an expression.
///
/// `opts.Namespace` -> `namespace`, `opts.PVCName` -> `PVCName`,
/// `snap.GetName()` -> `getName`. Index expressions and other non-identifier
/// segments yield `None`.
pub fn label_from_expression(expr: &str) -> Option<String> {
    let segment = expr.trim().rsplit('.').next()?;
    let segment = segment.strip_suffix("()").unwrap_or(segment);
    let segment = segment.trim_matches(&[':', '/'][..]);
    if !is_identifier(segment) || is_rejected(segment) {
        return None;
    }
    Some(decapitalize(segment))
}

fn label_from_id_noun(fragment: &str) -> Option<String> {
    let fragment = fragment.trim_end().trim_end_matches(TRAILING_SEPARATORS).trim_end();
    let noun = ID_NOUN.captures(fragment)?.get(1)?.as_str();
    if noun.eq_ignore_ascii_case("with") || is_rejected(noun) {
        return None;
    }
    Some(format!("{}ID", decapitalize(noun)))
}

fn label_from_words(previous: Option<&str>, last: &str) -> Option<String> {
    let previous = previous.filter(|w| is_identifier(w));
    let label = match word_rule(last) {
        None => decapitalize(last),
        Some(WordRule::CombineWithPrevious) => {
            let previous = previous?;
            format!("{}{}", decapitalize(previous), capitalize(&last.to_lowercase()))
        }
        Some(WordRule::UsePrevious) => decapitalize(previous?),
        Some(WordRule::UseExpression) | Some(WordRule::Reject) => return None,
    };

    (is_identifier(&label) && !is_rejected(&label)).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_word() {
        assert_eq!(infer_label("Unable to parse sizeFormat", "sizeFmt").as_deref(), Some("sizeFormat"));
        assert_eq!(infer_label("Failed to create job", "job.name").as_deref(), Some("job"));
        assert_eq!(infer_label("Unable to create PV for volume", "pv").as_deref(), Some("volume"));
        assert_eq!(infer_label("failed to read env from dir", "dir").as_deref(), Some("dir"));
        assert_eq!(infer_label("Invalid log level", "v").as_deref(), Some("level"));
    }

    #[test]
    fn test_acronyms_are_kept() {
        assert_eq!(infer_label("Unable to create PVC", "pvc").as_deref(), Some("PVC"));
        assert_eq!(infer_label("Failed to get PV", "pvName").as_deref(), Some("PV"));
    }

    #[test]
    fn test_id_noun() {
        assert_eq!(infer_label("Failed to find volume with ID", "id").as_deref(), Some("volumeID"));
        assert_eq!(infer_label("Failed to delete Snapshot ID:", "id").as_deref(), Some("snapshotID"));
        assert_eq!(infer_label("No PVC ID", "x").as_deref(), Some("PVCID"));
        assert_eq!(infer_label("Failed with ID", "requestID").as_deref(), Some("ID"));
    }

    #[test]
    fn test_combination_words() {
        assert_eq!(infer_label("Unsupported volume type", "t").as_deref(), Some("volumeType"));
        assert_eq!(infer_label("Invalid secret name", "s").as_deref(), Some("secretName"));
        assert_eq!(infer_label("Bad PVC name", "s").as_deref(), Some("PVCName"));
        // No word to combine with: the expression decides.
        assert_eq!(infer_label("Name", "opts.PodName").as_deref(), Some("podName"));
    }

    #[test]
    fn test_create_uses_previous_word() {
        assert_eq!(infer_label("Snapshot create", "s").as_deref(), Some("snapshot"));
        assert_eq!(infer_label("create", "req.Bucket").as_deref(), Some("bucket"));
    }

    #[test]
    fn test_filler_word_uses_expression() {
        assert_eq!(infer_label("Unexpected response, got", "resp.StatusCode").as_deref(), Some("statusCode"));
    }

    #[test]
    fn test_blacklist() {
        assert_eq!(
            infer_label("Failed to uninstall", "cb.chart.Release").as_deref(),
            Some("release")
        );
        assert_eq!(infer_label("Failed to uninstall", "uninstall"), None);
        assert_eq!(label_from_expression("opts.Uninstall"), None);
    }

    #[test]
    fn test_brackets_and_separators() {
        assert_eq!(infer_label("Failed to parse function version {", "v").as_deref(), Some("version"));
        assert_eq!(infer_label("Unknown region:", "r").as_deref(), Some("region"));
        assert_eq!(infer_label("Path (dir)", "p").as_deref(), Some("dir"));
        assert_eq!(infer_label("Failed to get pod from podOptions.", "p").as_deref(), Some("podOptions"));
    }

    #[test]
    fn test_no_static_text() {
        assert_eq!(infer_label("", "opts.Namespace").as_deref(), Some("namespace"));
        assert_eq!(infer_label("   ", "errAccessingNode").as_deref(), Some("errAccessingNode"));
        assert_eq!(infer_label("", "n[0]"), None);
        assert_eq!(infer_label("", r#"fmt.Sprintf("a.b")"#), None);
    }

    #[test]
    fn test_non_identifier_word_falls_back() {
        assert_eq!(infer_label(r#"value \""#, "v.Raw").as_deref(), Some("raw"));
        assert_eq!(infer_label("took 5", "elapsed").as_deref(), Some("elapsed"));
    }

    #[test]
    fn test_label_from_expression() {
        assert_eq!(label_from_expression("namespace").as_deref(), Some("namespace"));
        assert_eq!(label_from_expression("opts.Namespace").as_deref(), Some("namespace"));
        assert_eq!(label_from_expression("opts.PVCName").as_deref(), Some("PVCName"));
        assert_eq!(label_from_expression("snap.GetName()").as_deref(), Some("getName"));
        assert_eq!(label_from_expression("p.Status.String()").as_deref(), Some("string"));
        assert_eq!(label_from_expression("len(vols)"), None);
        assert_eq!(label_from_expression(""), None);
    }

    #[test]
    fn test_label_from_word() {
        assert_eq!(label_from_word("Namespace", "opts.Namespace").as_deref(), Some("namespace"));
        assert_eq!(label_from_word("NameFmt", "opts.GenerateName").as_deref(), Some("nameFmt"));
        assert_eq!(label_from_word("Name", "opts.PodName").as_deref(), Some("podName"));
        assert_eq!(label_from_word("AZ", "az").as_deref(), Some("AZ"));
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Namespace"), "namespace");
        assert_eq!(decapitalize("PVC"), "PVC");
        assert_eq!(decapitalize("P"), "p");
        assert_eq!(decapitalize(""), "");
        assert_eq!(decapitalize("already"), "already");
    }

    #[test]
    fn test_word_rule_table() {
        assert_eq!(word_rule("Type"), Some(WordRule::CombineWithPrevious));
        assert_eq!(word_rule("create"), Some(WordRule::UsePrevious));
        assert_eq!(word_rule("got"), Some(WordRule::UseExpression));
        assert_eq!(word_rule("UNINSTALL"), Some(WordRule::Reject));
        assert_eq!(word_rule("volume"), None);
    }
}
