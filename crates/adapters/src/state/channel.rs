// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-backed state adapter
//!
//! Forwards every state change to an mpsc receiver owned by the daemon loop.

use super::{StateAdapter, StateError};
use async_trait::async_trait;
use pools_core::EntityState;
use tokio::sync::mpsc;

/// A state change delivered to the receiver
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    Published(Box<EntityState>),
    Removed(String),
}

#[derive(Clone, Debug)]
pub struct ChannelStateAdapter {
    tx: mpsc::Sender<StateEvent>,
}

impl ChannelStateAdapter {
    pub fn new(tx: mpsc::Sender<StateEvent>) -> Self {
        Self { tx }
    }

    /// Create an adapter together with the receiving end
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<StateEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl StateAdapter for ChannelStateAdapter {
    async fn publish(&self, state: &EntityState) -> Result<(), StateError> {
        self.tx
            .send(StateEvent::Published(Box::new(state.clone())))
            .await
            .map_err(|_| StateError::Closed)
    }

    async fn remove(&self, entity_id: &str) -> Result<(), StateError> {
        self.tx
            .send(StateEvent::Removed(entity_id.to_string()))
            .await
            .map_err(|_| StateError::Closed)
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
