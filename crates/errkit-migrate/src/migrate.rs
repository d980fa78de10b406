//! Whole-source migration: runs the rules over every line of a file.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::MigrateConfig;
use crate::rule::{ChangeKind, CheckResult, ConvertResult, LineOutcome, Rule, SourceLocation};
use crate::utils::file_io::{read_file, write_file};

/// Upper bound on rewrite passes over one line.
pub const MAX_PASSES: usize = 16;

/// How lines that need manual migration are left in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPolicy {
    pub annotate: bool,
    pub marker: String,
}

impl ReviewPolicy {
    pub fn from_config(config: &MigrateConfig) -> Self {
        Self {
            annotate: config.annotate_review,
            marker: config.review_marker.clone(),
        }
    }

    fn annotate(&self, line: &mut String) {
        if self.annotate && !line.contains(&self.marker) {
            line.push(' ');
            line.push_str(&self.marker);
        }
    }
}

/// One reported line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// 1-based line number.
    pub row: usize,
    /// 1-based character column.
    pub column: usize,
    pub rule: String,
    pub kind: ChangeKind,
    /// The new line, the review reason or the parse error.
    pub detail: String,
}

/// Result of migrating one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub content: String,
    pub changes: Vec<LineChange>,
}

impl Migration {
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }
}

/// Split a physical line into its text and its terminator.
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Column of the token where `before` and `after` start to differ.
fn first_difference_column(before: &str, after: &str) -> usize {
    let common: Vec<char> = before
        .chars()
        .zip(after.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect();
    let token_start = common
        .iter()
        .rposition(|c| !(c.is_alphanumeric() || *c == '_'))
        .map_or(0, |i| i + 1);
    token_start + 1
}

fn indent_column(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count() + 1
}

/// Run `rules` over every line of `content`.
///
/// For each line the first rule with something to say claims it; a rewritten
/// line is fed back to the same rule until it stops changing, so several
/// calls on one line are all handled and a second migration is a no-op.
/// Line terminators are preserved.
pub fn migrate_source(
    content: &str,
    rules: &[Arc<dyn Rule + Send + Sync>],
    review: &ReviewPolicy,
) -> Migration {
    let mut output = String::with_capacity(content.len());
    let mut changes = Vec::new();

    for (index, physical) in content.split_inclusive('\n').enumerate() {
        let (line, terminator) = split_terminator(physical);
        let migrated = migrate_line(line, index + 1, rules, review, &mut changes);
        output.push_str(&migrated);
        output.push_str(terminator);
    }

    Migration {
        content: output,
        changes,
    }
}

fn migrate_line(
    line: &str,
    row: usize,
    rules: &[Arc<dyn Rule + Send + Sync>],
    review: &ReviewPolicy,
    changes: &mut Vec<LineChange>,
) -> String {
    for rule in rules {
        let mut outcome = rule.rewrite_line(line);
        if outcome.is_untouched() {
            continue;
        }

        let mut current = line.to_string();
        let mut passes = 0;
        let last = loop {
            match outcome {
                LineOutcome::Rewritten(next) if next != current && passes < MAX_PASSES => {
                    current = next;
                    passes += 1;
                    outcome = rule.rewrite_line(&current);
                }
                LineOutcome::Rewritten(_) => {
                    if passes == MAX_PASSES {
                        tracing::warn!(row, rule = rule.name(), "Line still changing, giving up");
                    }
                    break LineOutcome::Untouched;
                }
                other => break other,
            }
        };

        let mut record = |kind, column, detail: String| {
            changes.push(LineChange {
                row,
                column,
                rule: rule.name().to_string(),
                kind,
                detail,
            });
        };

        // A malformed remainder leaves the whole line as it was.
        if let LineOutcome::Malformed(err) = &last {
            record(ChangeKind::Malformed, indent_column(line), err.to_string());
            return line.to_string();
        }

        if passes > 0 {
            record(
                ChangeKind::Rewritten,
                first_difference_column(line, &current),
                current.trim().to_string(),
            );
        }
        match last {
            LineOutcome::NeedsReview(reason) => {
                review.annotate(&mut current);
                record(ChangeKind::NeedsReview, indent_column(&current), reason.to_string());
            }
            LineOutcome::Untouched | LineOutcome::Rewritten(_) | LineOutcome::Malformed(_) => {}
        }

        return current;
    }

    line.to_string()
}

/// Report what migrating `file_path` would do, one result per reported line.
pub fn check_file(
    file_path: &Path,
    rules: &[Arc<dyn Rule + Send + Sync>],
    review: &ReviewPolicy,
) -> Result<Vec<CheckResult>> {
    let content = read_file(file_path)?;
    let migration = migrate_source(&content, rules, review);
    let path = file_path.to_string_lossy().to_string();

    Ok(migration
        .changes
        .into_iter()
        .map(|change| CheckResult {
            rule_name: change.rule,
            file_path: path.clone(),
            has_issue: true,
            issue_count: 1,
            kind: change.kind,
            message: Some(format!(
                "{}:{}:{} {}: {}",
                path, change.row, change.column, change.kind, change.detail
            )),
            location: Some(SourceLocation {
                row: change.row,
                column: change.column,
            }),
        })
        .collect())
}

/// Migrate one file.
///
/// With `in_place` the file is replaced when something changed; otherwise the
/// converted content is returned. `check_mode` never writes.
pub fn convert_file(
    file_path: &Path,
    rules: &[Arc<dyn Rule + Send + Sync>],
    review: &ReviewPolicy,
    in_place: bool,
    check_mode: bool,
) -> Result<ConvertResult> {
    let content = read_file(file_path)?;
    let migration = migrate_source(&content, rules, review);
    let changed = migration.content != content;

    let written = changed && in_place && !check_mode;
    if written {
        write_file(file_path, &migration.content)?;
        tracing::info!(
            path = %file_path.display(),
            rewritten = migration.count(ChangeKind::Rewritten),
            "Migrated file"
        );
    }

    Ok(ConvertResult {
        file_path: file_path.to_string_lossy().to_string(),
        lines_rewritten: migration.count(ChangeKind::Rewritten),
        lines_needing_review: migration.count(ChangeKind::NeedsReview),
        lines_malformed: migration.count(ChangeKind::Malformed),
        written,
        content: (!in_place).then_some(migration.content),
    })
}
