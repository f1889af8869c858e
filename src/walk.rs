use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names never descended into, regardless of ignore files.
const ALWAYS_SKIPPED: &[&str] = &["node_modules"];

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Discover source files under `root` with one of `extensions`.
///
/// - Respects `.gitignore`
/// - Never enters `node_modules`
/// - Applies include/exclude glob patterns, matched against the path
///   relative to `root` and against the absolute path
/// - Returns sorted paths for deterministic output
pub fn discover_files(
    root: &Path,
    extensions: &[String],
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let exclude_set = build_globset(exclude_patterns)?;
    let include_set = if include_patterns.is_empty() {
        None
    } else {
        Some(build_globset(include_patterns)?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !ALWAYS_SKIPPED.contains(&name) && name != ".git")
        })
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!("walk error: {err}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|known| known == ext));
        if !ext_match {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}
