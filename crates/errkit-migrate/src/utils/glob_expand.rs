use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never descended into when walking a tree
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

fn is_skipped_dir(name: &str) -> bool {
    (name.starts_with('.') && name != "." && name != "..") || SKIPPED_DIRS.contains(&name)
}

/// Expand inputs into a list of file paths
///
/// Patterns containing glob characters (*, ?, [) are expanded with `glob`.
/// Directories are walked recursively and filtered with `accept`; literal
/// file paths are taken as they are and must exist.
pub fn expand_inputs(patterns: &[String], accept: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let paths = glob::glob(pattern)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?;

            let mut match_count = 0;
            for path in paths {
                let path =
                    path.with_context(|| format!("Failed to read glob match for: {}", pattern))?;
                if path.is_dir() {
                    files.extend(walk_dir(&path, &accept)?);
                } else {
                    files.push(path);
                }
                match_count += 1;
            }

            if match_count == 0 {
                tracing::warn!(pattern = %pattern, "No files matched pattern");
            }
        } else {
            let path = PathBuf::from(pattern);
            if !path.exists() {
                anyhow::bail!("File not found: {}", pattern);
            }
            if path.is_dir() {
                files.extend(walk_dir(&path, &accept)?);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Files under `root` accepted by `accept`, skipping hidden and vendored trees
fn walk_dir(root: &Path, accept: &impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !entry.file_name().to_str().is_some_and(is_skipped_dir)
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;
        if entry.file_type().is_file() && accept(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Walked directory");
    Ok(files)
}
