// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notify adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded playback request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCall {
    pub channel: String,
    pub message: String,
}

/// Fake notify adapter for testing
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    calls: Arc<Mutex<Vec<NotifyCall>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded sends, including failed ones
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages sent to one channel, in order
    pub fn messages_for(&self, channel: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.channel == channel)
            .map(|c| c.message)
            .collect()
    }

    /// Make subsequent sends fail with the given message (`None` to recover)
    pub fn set_failure(&self, message: Option<&str>) {
        *self.fail_with.lock().unwrap_or_else(|e| e.into_inner()) = message.map(str::to_string);
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(NotifyCall {
                channel: channel.to_string(),
                message: message.to_string(),
            });

        match self.fail_with.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            Some(reason) => Err(NotifyError::Failed(reason)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
