// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line pools: one text file, one value per non-blank line

use crate::config::{DEFAULT_MAX_CHARS, DEFAULT_MAX_LINES};
use crate::pool::{PoolAttributes, PoolOps};
use crate::selection::{SelectionMode, Selector};
use crate::stats::{format_mtime, PoolStats};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tokio::task::JoinError;
use unicode_normalization::UnicodeNormalization;

const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("load task failed: {0}")]
    Join(#[from] JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    pub max_lines: usize,
    pub max_chars: usize,
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Parsed file content with counts of what was dropped or shortened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedLines {
    pub lines: Vec<String>,
    pub truncated: usize,
    pub ignored_blank: usize,
    pub mtime: Option<SystemTime>,
}

/// Split raw file bytes into cleaned lines.
///
/// Invalid UTF-8 is dropped, BOMs removed, each line NFC-normalized and
/// trimmed. Blank lines are counted and skipped; long lines are cut to
/// `max_chars`. Parsing stops once `max_lines` lines are kept.
pub fn parse_lines(bytes: &[u8], limits: LineLimits) -> LoadedLines {
    let text = decode_ignoring_invalid(bytes).replace("\r\n", "\n");

    let mut loaded = LoadedLines::default();
    for raw in text.split_terminator(['\n', '\r']) {
        if loaded.lines.len() >= limits.max_lines {
            break;
        }
        let without_bom: String = raw.chars().filter(|c| *c != BOM).collect();
        let normalized: String = without_bom.nfc().collect();
        let line = normalized.trim();
        if line.is_empty() {
            loaded.ignored_blank += 1;
            continue;
        }
        if line.chars().count() > limits.max_chars {
            loaded.lines.push(line.chars().take(limits.max_chars).collect());
            loaded.truncated += 1;
        } else {
            loaded.lines.push(line.to_string());
        }
    }
    loaded
}

fn decode_ignoring_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // Truncated sequence at end of input
                    None => return out,
                }
            }
        }
    }
}

/// Modification time of `path`, `None` when it does not exist
pub fn file_mtime_blocking(path: &Path) -> Result<Option<SystemTime>, LoadError> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => Ok(Some(mtime)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read and parse `path`; a missing file loads as empty
pub fn load_lines_blocking(path: &Path, limits: LineLimits) -> Result<LoadedLines, LoadError> {
    let Some(mtime) = file_mtime_blocking(path)? else {
        return Ok(LoadedLines::default());
    };
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadedLines::default()),
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    let mut loaded = parse_lines(&bytes, limits);
    loaded.mtime = Some(mtime);
    Ok(loaded)
}

pub async fn load_lines(path: PathBuf, limits: LineLimits) -> Result<LoadedLines, LoadError> {
    tokio::task::spawn_blocking(move || load_lines_blocking(&path, limits)).await?
}

pub async fn file_mtime(path: PathBuf) -> Result<Option<SystemTime>, LoadError> {
    tokio::task::spawn_blocking(move || file_mtime_blocking(&path)).await?
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAttributes {
    pub file: String,
    pub line_count: usize,
    pub truncated_lines: usize,
    pub ignored_blank: usize,
    pub last_index: Option<usize>,
    pub file_mtime: Option<String>,
    #[serde(flatten)]
    pub stats: PoolStats,
}

#[derive(Debug)]
pub struct LinePool {
    path: PathBuf,
    limits: LineLimits,
    fallback_text: String,
    selector: Selector,
    content: LoadedLines,
    current: String,
    stats: PoolStats,
}

impl LinePool {
    pub fn new(
        path: PathBuf,
        limits: LineLimits,
        mode: SelectionMode,
        no_repeat: usize,
        fallback_text: impl Into<String>,
    ) -> Self {
        Self {
            path,
            limits,
            fallback_text: fallback_text.into(),
            selector: Selector::new(mode, no_repeat),
            content: LoadedLines::default(),
            current: String::new(),
            stats: PoolStats::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.content.lines
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    async fn is_stale(&self) -> bool {
        match file_mtime(self.path.clone()).await {
            Ok(Some(mtime)) => self.content.mtime != Some(mtime),
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(file = %self.path.display(), error = %e, "stat failed");
                true
            }
        }
    }
}

#[async_trait]
impl PoolOps for LinePool {
    async fn reload(&mut self, force: bool) -> bool {
        if !force && !self.is_stale().await {
            return false;
        }

        self.content = match load_lines(self.path.clone(), self.limits).await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(file = %self.path.display(), error = %e, "line load failed");
                LoadedLines::default()
            }
        };
        self.selector.retain_within(self.content.lines.len());
        tracing::debug!(
            file = %self.path.display(),
            lines = self.content.lines.len(),
            truncated = self.content.truncated,
            ignored_blank = self.content.ignored_blank,
            "lines loaded"
        );
        true
    }

    fn select_next(&mut self) -> String {
        let mut rng = rand::thread_rng();
        self.current = match self.selector.pick(self.content.lines.len(), &mut rng) {
            Some(idx) => self.content.lines[idx].clone(),
            None => self.fallback_text.clone(),
        };
        self.current.clone()
    }

    fn current(&self) -> &str {
        &self.current
    }

    fn reset_stats(&mut self) {
        self.selector.clear_history();
        self.stats.reset();
    }

    fn attributes(&self) -> PoolAttributes {
        PoolAttributes::Lines(LineAttributes {
            file: self.path.display().to_string(),
            line_count: self.content.lines.len(),
            truncated_lines: self.content.truncated,
            ignored_blank: self.content.ignored_blank,
            last_index: self.selector.last_index(),
            file_mtime: self.content.mtime.map(format_mtime),
            stats: self.stats.clone(),
        })
    }

    fn stats_mut(&mut self) -> &mut PoolStats {
        &mut self.stats
    }
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
