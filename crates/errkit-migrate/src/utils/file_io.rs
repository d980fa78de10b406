use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a file to a string
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Replace a file's content atomically
///
/// The content goes to a temporary file in the same directory, which is then
/// renamed over the original. The original permissions are kept.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of: {}", path.display()))?;
    }

    temp.persist(path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;
    Ok(())
}
