//! Utilities for path handling and size formatting.

use crate::error::{PdfOpsError, Result};
use std::path::{Component, Path, PathBuf};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Matches of each pattern are appended in lexical order, patterns in the
/// order given. A pattern without matches contributes nothing.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern.as_ref())?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |reason: String| PdfOpsError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    let paths = glob::glob(pattern).map_err(|err| invalid(err.to_string()))?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        resolved_paths.push(entry.map_err(|err| invalid(err.to_string()))?);
    }

    Ok(resolved_paths)
}

/// Make `path` absolute against the current working directory.
///
/// `.` and `..` components are resolved lexically, so the path is not
/// required to exist and symlinks are not followed. `..` never climbs above
/// the root.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }

    Ok(normalized)
}

/// File name of `path` with a trailing `.pdf` removed.
///
/// Only the exact lowercase `.pdf` suffix is stripped; any other extension
/// stays part of the stem.
pub fn pdf_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.strip_suffix(".pdf") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
