//! Candidate notebook discovery.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nbdocs_tools::NotebookPattern;

/// The discovery pattern for one prefix: `<prefix>[0-9]*.<ext>`.
pub fn prefix_pattern(prefix: &str, extension: &str) -> Result<NotebookPattern> {
    Ok(NotebookPattern::new(&format!(
        "{}[0-9]*.{}",
        prefix, extension
    ))?)
}

/// Names in `dir` matching `pattern`, sorted lexicographically.
pub fn matching_names(dir: &Path, pattern: &NotebookPattern) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("read source directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if pattern.matches(name) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
