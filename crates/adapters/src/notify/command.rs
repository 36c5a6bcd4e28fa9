// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-backed notify adapter
//!
//! Runs the configured program with its arguments, then the channel and the
//! message as the final two arguments.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use pools_core::NotifyConfig;
use tokio::process::Command;

#[derive(Clone, Debug, Default)]
pub struct CommandNotifyAdapter {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandNotifyAdapter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: Some(program.into()),
            args,
        }
    }

    /// Adapter for the `[notify]` section; unconfigured sends fail with
    /// `NotConfigured`
    pub fn from_config(config: &NotifyConfig) -> Self {
        match config.program() {
            Some((program, args)) => Self::new(program, args.to_vec()),
            None => Self::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.program.is_some()
    }
}

#[async_trait]
impl NotifyAdapter for CommandNotifyAdapter {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        let Some(program) = &self.program else {
            return Err(NotifyError::NotConfigured);
        };

        let output = Command::new(program)
            .args(&self.args)
            .arg(channel)
            .arg(message)
            .output()
            .await
            .map_err(|e| NotifyError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotifyError::Failed(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
