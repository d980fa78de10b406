use crate::config::MigrateConfig;
use crate::rule::{LineOutcome, Rule};

/// Replaces the quoted legacy import path with the target one.
///
/// Only the exact quoted path on an `import` line or inside an import block
/// is touched; `"github.com/pkg/errors/v2"` is left as it is.
pub struct ImportPathRule {
    legacy: String,
    target: String,
    description: String,
}

impl ImportPathRule {
    pub fn new(config: &MigrateConfig) -> Self {
        Self {
            legacy: format!("\"{}\"", config.legacy_import),
            target: format!("\"{}\"", config.target_import),
            description: format!(
                "Replace the {} import with {}",
                config.legacy_import, config.target_import
            ),
        }
    }
}

impl Rule for ImportPathRule {
    fn name(&self) -> &str {
        "error-import"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn rewrite_line(&self, line: &str) -> LineOutcome {
        let trimmed = line.trim_start();
        let is_import_line = trimmed.starts_with("import ") || trimmed.starts_with('"');
        if !is_import_line || !line.contains(&self.legacy) {
            return LineOutcome::Untouched;
        }
        LineOutcome::Rewritten(line.replacen(&self.legacy, &self.target, 1))
    }
}
