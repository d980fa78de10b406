use anyhow::{Result, anyhow};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::MigrateConfig;
use crate::error::ParseError;

/// Location information for a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub row: usize,
    pub column: usize,
}

/// What happened to one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Rewritten,
    NeedsReview,
    Malformed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeKind::Rewritten => "rewritten",
            ChangeKind::NeedsReview => "needs review",
            ChangeKind::Malformed => "malformed",
        })
    }
}

/// Result of checking a file
/// Each CheckResult represents a single reported line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub rule_name: String,
    pub file_path: String,
    pub has_issue: bool,
    pub issue_count: usize,
    pub kind: ChangeKind,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// Result of converting a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    pub file_path: String,
    pub lines_rewritten: usize,
    pub lines_needing_review: usize,
    pub lines_malformed: usize,
    /// Whether the file on disk was replaced
    pub written: bool,
    /// Converted content when not writing in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Why a line with a legacy call was left for a human
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewReason {
    /// The function has no handler (e.g. `errors.Cause`)
    UnknownCallee(String),
    /// A handler exists but could not render the call safely
    Declined(String),
}

impl fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewReason::UnknownCallee(function) => write!(f, "no handler for '{function}'"),
            ReviewReason::Declined(function) => {
                write!(f, "'{function}' message shape not recognized")
            }
        }
    }
}

/// Outcome of running a rule over one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Nothing for this rule on the line
    Untouched,
    /// The full replacement line
    Rewritten(String),
    NeedsReview(ReviewReason),
    /// The line could not be scanned; it is kept verbatim
    Malformed(ParseError),
}

impl LineOutcome {
    pub fn is_untouched(&self) -> bool {
        matches!(self, LineOutcome::Untouched)
    }
}

/// A rule that rewrites single lines of source code
pub trait Rule {
    /// The name of this rule (e.g., "error-calls")
    fn name(&self) -> &str;

    /// A short description of what this rule rewrites
    fn description(&self) -> &str;

    /// Rewrite one line, without its terminator
    fn rewrite_line(&self, line: &str) -> LineOutcome;
}

/// Registry of all available rules, in the order they run
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule + Send + Sync>>,
}

impl RuleRegistry {
    /// Create a new registry and register all known rules
    pub fn new(config: &MigrateConfig) -> Self {
        let mut registry = Self { rules: Vec::new() };

        // Import lines never hold calls, so order only matters for reporting
        registry.register(Arc::new(
            crate::conversions::import_path::ImportPathRule::new(config),
        ));
        registry.register(Arc::new(
            crate::conversions::error_calls::ErrorCallsRule::new(config),
        ));

        registry
    }

    /// Register a rule
    fn register(&mut self, rule: Arc<dyn Rule + Send + Sync>) {
        self.rules.push(rule);
    }

    /// Get a rule by name, or return an error if not found
    pub fn get(&self, name: &str) -> Result<Arc<dyn Rule + Send + Sync>> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown rule: {}", name))
    }

    /// Get all registered rules
    pub fn all(&self) -> Vec<Arc<dyn Rule + Send + Sync>> {
        self.rules.clone()
    }

    /// List all rule names
    pub fn list_names(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.name().to_string()).collect()
    }

    /// Resolve rule names from the command line; `all` selects every rule
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Arc<dyn Rule + Send + Sync>>> {
        if names.iter().any(|name| name == "all") {
            return Ok(self.all());
        }
        // Keep registry order whatever order the names were given in
        for name in names {
            self.get(name)?;
        }
        Ok(self
            .rules
            .iter()
            .filter(|rule| names.iter().any(|name| name == rule.name()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let registry = RuleRegistry::new(&MigrateConfig::default());
        assert_eq!(registry.list_names(), vec!["error-import", "error-calls"]);
    }

    #[test]
    fn test_unknown_rule() {
        let registry = RuleRegistry::new(&MigrateConfig::default());
        let err = registry.get("unused-imports").err().unwrap();
        assert!(err.to_string().contains("Unknown rule: unused-imports"));
    }

    #[test]
    fn test_resolve() {
        let registry = RuleRegistry::new(&MigrateConfig::default());
        let names = |rules: Vec<Arc<dyn Rule + Send + Sync>>| {
            rules.iter().map(|r| r.name().to_string()).collect::<Vec<_>>()
        };

        assert_eq!(names(registry.resolve(&["all".to_string()]).unwrap()).len(), 2);
        assert_eq!(
            names(registry.resolve(&["error-calls".to_string(), "error-import".to_string()]).unwrap()),
            vec!["error-import", "error-calls"]
        );
        assert!(registry.resolve(&["nope".to_string()]).is_err());
    }

    #[test]
    fn test_check_result_json() {
        let result = CheckResult {
            rule_name: "error-calls".to_string(),
            file_path: "a.go".to_string(),
            has_issue: true,
            issue_count: 1,
            kind: ChangeKind::NeedsReview,
            message: None,
            location: Some(SourceLocation { row: 3, column: 2 }),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""kind":"needs-review""#));
        assert!(json.contains(r#""location":{"row":3,"column":2}"#));
    }
}
