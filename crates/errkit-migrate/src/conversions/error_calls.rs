use crate::config::MigrateConfig;
use crate::rewrite::CallRewriter;
use crate::rule::{LineOutcome, Rule};

/// Rewrites legacy error-construction calls.
pub struct ErrorCallsRule {
    rewriter: CallRewriter,
    description: String,
}

impl ErrorCallsRule {
    pub fn new(config: &MigrateConfig) -> Self {
        Self {
            rewriter: CallRewriter::new(config),
            description: format!(
                "Rewrite {}.Wrap/Wrapf/Errorf/New calls as {}.Wrap/New with labeled values",
                config.legacy_namespace, config.target_namespace
            ),
        }
    }
}

impl Rule for ErrorCallsRule {
    fn name(&self) -> &str {
        "error-calls"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn rewrite_line(&self, line: &str) -> LineOutcome {
        self.rewriter.rewrite_line(line)
    }
}
