//! Migration settings.
//!
//! Settings come from an optional YAML file; every key may be omitted.
//!
//! ```yaml
//! legacy-namespace: errors
//! target-namespace: errkit
//! strictness: lenient
//! extensions: [go]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a formatted message has several values and no matcher
/// recognizes its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Leave the call alone and mark the line for manual review.
    #[default]
    Strict,
    /// Fold the template and values into a single formatted message.
    Lenient,
}

/// Errors raised while loading or validating a [`MigrateConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or has unknown keys.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A namespace is not a plain identifier.
    #[error("Invalid {field} '{value}': expected an identifier")]
    InvalidNamespace { field: &'static str, value: String },

    /// Rewritten lines would still match the legacy namespace.
    #[error("Legacy and target namespace must differ (both are '{0}')")]
    SameNamespace(String),

    #[error("Review marker must not be empty")]
    EmptyReviewMarker,

    #[error("At least one file extension is required")]
    NoExtensions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrateConfig {
    /// Package name of the API being replaced.
    pub legacy_namespace: String,
    /// Package name of the replacement API.
    pub target_namespace: String,
    pub legacy_import: String,
    pub target_import: String,
    /// Function used to build a message in the fallback rendering.
    pub format_call: String,
    /// File extensions picked up when walking directories, without the dot.
    pub extensions: Vec<String>,
    pub strictness: Strictness,
    /// Append the review marker to lines that need manual migration.
    pub annotate_review: bool,
    pub review_marker: String,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            legacy_namespace: "errors".to_string(),
            target_namespace: "errkit".to_string(),
            legacy_import: "github.com/pkg/errors".to_string(),
            target_import: "github.com/kanisterio/errkit".to_string(),
            format_call: "fmt.Sprintf".to_string(),
            extensions: vec!["go".to_string()],
            strictness: Strictness::Strict,
            annotate_review: true,
            review_marker: "// TODO: migrate manually".to_string(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl MigrateConfig {
    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        let config = Self::from_yaml(&text, &origin)?;
        tracing::debug!(path = %origin, "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("legacy-namespace", &self.legacy_namespace),
            ("target-namespace", &self.target_namespace),
        ] {
            if !is_identifier(value) {
                return Err(ConfigError::InvalidNamespace {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.legacy_namespace == self.target_namespace {
            return Err(ConfigError::SameNamespace(self.legacy_namespace.clone()));
        }
        if self.review_marker.trim().is_empty() {
            return Err(ConfigError::EmptyReviewMarker);
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }

    /// The legacy namespace with its trailing dot, as it appears at call sites.
    pub fn legacy_prefix(&self) -> String {
        format!("{}.", self.legacy_namespace)
    }

    /// True if `path` has one of the configured extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.') == ext))
    }
}
