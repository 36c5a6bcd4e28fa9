// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use std::fmt;
use std::path::Path;

use crate::client::ClientError;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct PoolsError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl PoolsError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Map a client error, adding hints where there is something to suggest
    pub fn from_client(error: ClientError, socket_path: &Path) -> Self {
        match error {
            ClientError::DaemonNotRunning => Self::daemon_not_running(socket_path),
            other => Self::new(other.to_string()),
        }
    }

    pub fn daemon_not_running(socket_path: &Path) -> Self {
        PoolsError::new("Daemon not running")
            .with_context(format!("No daemon is listening on {}", socket_path.display()))
            .with_suggestion("Start it: poolsd /path/to/pools.toml")
            .with_suggestion("Or point at another socket: pools --socket PATH ...")
    }

    pub fn entity_not_found(entity_id: &str) -> Self {
        PoolsError::new(format!("Entity '{}' not found", entity_id))
            .with_suggestion("List known entities: pools list")
    }

    pub fn service_failed(service: &str, error: &str) -> Self {
        PoolsError::new(format!("{} failed: {}", service, error))
    }
}

impl fmt::Display for PoolsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                write!(f, "\n  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n\nsuggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for PoolsError {}
