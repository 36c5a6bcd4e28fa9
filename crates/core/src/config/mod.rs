// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform configuration
//!
//! One TOML document declares both kinds of pools. Pools listed explicitly
//! are used as-is; an empty list means auto-discovery from the directory.

mod notify;

pub use notify::NotifyConfig;

use crate::paths::{resolve_path, NameFilter};
use crate::selection::SelectionMode;
use crate::serve::ServeMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LINES_DIRECTORY: &str = "custom_components/pools/assets/lines";
pub const DEFAULT_MEDIA_DIRECTORY: &str = "custom_components/pools/assets/media";
pub const DEFAULT_NO_REPEAT: usize = 1;
pub const DEFAULT_MAX_LINES: usize = 255;
pub const DEFAULT_MAX_CHARS: usize = 255;
pub const DEFAULT_LINES_EXTENSIONS: &[&str] = &[".txt"];
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] =
    &[".mp3", ".ogg", ".wav", ".m4a", ".aac", ".opus", ".flac"];

pub const MAX_NO_REPEAT: usize = 1000;
pub const MAX_LINES_LIMIT: usize = 10_000;
pub const MAX_CHARS_LIMIT: usize = 20_000;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        value: usize,
    },
    #[error("invalid glob pattern {pattern:?}: {message}")]
    Pattern { pattern: String, message: String },
    #[error("{0} pool entry has an empty {1}")]
    EmptyField(&'static str, &'static str),
}

/// An explicitly declared line pool: one file under `lines_directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinesPoolDef {
    pub file: String,
    pub name: String,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub entity_suffix: Option<String>,
}

/// An explicitly declared media pool: one folder under `media_directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPoolDef {
    pub folder: String,
    pub name: String,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub entity_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base directory for relative paths; the daemon defaults it to the
    /// directory holding the config file
    pub config_root: Option<PathBuf>,
    pub lines_directory: String,
    pub lines_pools: Vec<LinesPoolDef>,
    pub media_directory: String,
    pub media_pools: Vec<MediaPoolDef>,
    pub selection_mode: SelectionMode,
    pub no_repeat: usize,
    pub fallback_text: String,
    pub fallback_url: String,
    pub serve_from: ServeMode,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub lines_extensions: Vec<String>,
    pub media_extensions: Vec<String>,
    pub max_lines: usize,
    pub max_chars: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            config_root: None,
            lines_directory: DEFAULT_LINES_DIRECTORY.to_string(),
            lines_pools: Vec::new(),
            media_directory: DEFAULT_MEDIA_DIRECTORY.to_string(),
            media_pools: Vec::new(),
            selection_mode: SelectionMode::default(),
            no_repeat: DEFAULT_NO_REPEAT,
            fallback_text: String::new(),
            fallback_url: String::new(),
            serve_from: ServeMode::default(),
            include: Vec::new(),
            exclude: Vec::new(),
            lines_extensions: to_strings(DEFAULT_LINES_EXTENSIONS),
            media_extensions: to_strings(DEFAULT_MEDIA_EXTENSIONS),
            max_lines: DEFAULT_MAX_LINES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl PlatformConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlatformConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("no_repeat", self.no_repeat, 0, MAX_NO_REPEAT)?;
        check_range("max_lines", self.max_lines, 1, MAX_LINES_LIMIT)?;
        check_range("max_chars", self.max_chars, 1, MAX_CHARS_LIMIT)?;

        for def in &self.lines_pools {
            if def.file.trim().is_empty() {
                return Err(ConfigError::EmptyField("lines", "file"));
            }
            if def.name.trim().is_empty() {
                return Err(ConfigError::EmptyField("lines", "name"));
            }
        }
        for def in &self.media_pools {
            if def.folder.trim().is_empty() {
                return Err(ConfigError::EmptyField("media", "folder"));
            }
            if def.name.trim().is_empty() {
                return Err(ConfigError::EmptyField("media", "name"));
            }
        }

        self.lines_filter()?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.config_root.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a configured path against the config root
    pub fn resolve(&self, rel: &str) -> PathBuf {
        resolve_path(self.root(), rel)
    }

    pub fn lines_filter(&self) -> Result<NameFilter, ConfigError> {
        self.filter(&self.lines_extensions)
    }

    pub fn media_filter(&self) -> Result<NameFilter, ConfigError> {
        self.filter(&self.media_extensions)
    }

    fn filter(&self, extensions: &[String]) -> Result<NameFilter, ConfigError> {
        NameFilter::new(extensions, &self.include, &self.exclude).map_err(|e| {
            let pattern = self
                .include
                .iter()
                .chain(&self.exclude)
                .find(|p| glob::Pattern::new(p).is_err())
                .cloned()
                .unwrap_or_default();
            ConfigError::Pattern {
                pattern,
                message: e.msg.to_string(),
            }
        })
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
