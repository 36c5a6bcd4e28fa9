// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path resolution, slugs, and filename filtering

use glob::{Pattern, PatternError};
use std::path::{Path, PathBuf};

/// Resolve `rel` against `root`; absolute paths are returned unchanged
pub fn resolve_path(root: &Path, rel: &str) -> PathBuf {
    let path = Path::new(rel);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Lowercase `s`, collapse every run of non-alphanumerics to one `_`, and
/// trim leading/trailing underscores
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_underscore = false;
    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Filename without its final extension
pub fn file_stem(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// Last path component of a relative folder path
pub fn base_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Human-friendly display name for a file stem or folder
pub fn nice_name(base: &str) -> String {
    base.replace('_', " ")
}

/// Normalize configured extensions: lowercase with a leading dot
pub fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
        .collect()
}

/// Extension + include/exclude glob filter for directory entries.
///
/// A name passes when it ends with one of the extensions (case-insensitive),
/// matches at least one include pattern (if any are given), and matches no
/// exclude pattern.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    extensions: Vec<String>,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl NameFilter {
    pub fn new(
        extensions: &[String],
        include: &[String],
        exclude: &[String],
    ) -> Result<Self, PatternError> {
        Ok(Self {
            extensions: normalize_extensions(extensions),
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn has_extension(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    /// Include/exclude check only; exclusion always wins
    pub fn matches_patterns(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches(name)) {
            return false;
        }
        !self.exclude.iter().any(|p| p.matches(name))
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.has_extension(name) && self.matches_patterns(name)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, PatternError> {
    patterns.iter().map(|p| Pattern::new(p)).collect()
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
