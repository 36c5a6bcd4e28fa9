// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Playback notification configuration
//!
//! The `play` service forwards a media URL to a notification channel. The
//! channel names the target (e.g. a media player); the command, when set, is
//! the program that delivers it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHANNEL: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Channel used when a `play` call names none
    pub channel: String,
    /// Program and leading arguments; channel and URL are appended
    pub command: Vec<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            command: Vec::new(),
        }
    }
}

impl NotifyConfig {
    /// Split the command into program and arguments, if configured
    pub fn program(&self) -> Option<(&str, &[String])> {
        let (program, args) = self.command.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some((program.as_str(), args))
    }

    /// Channel to use for a call, falling back to the configured default
    pub fn channel_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(channel) if !channel.trim().is_empty() => channel,
            _ => &self.channel,
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
