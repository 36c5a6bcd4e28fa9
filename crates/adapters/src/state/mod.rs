// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity state publishing adapters

mod channel;
mod noop;

pub use channel::{ChannelStateAdapter, StateEvent};
pub use noop::NoOpStateAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStateAdapter, StateCall};

use async_trait::async_trait;
use pools_core::EntityState;
use thiserror::Error;

/// Errors from state publishing
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state sink closed")]
    Closed,
    #[error("state rejected for {entity_id}: {reason}")]
    Rejected { entity_id: String, reason: String },
}

/// Adapter for publishing entity state to the host
#[async_trait]
pub trait StateAdapter: Clone + Send + Sync + 'static {
    /// Publish the current value and attributes of an entity
    async fn publish(&self, state: &EntityState) -> Result<(), StateError>;

    /// Withdraw an entity's state
    async fn remove(&self, entity_id: &str) -> Result<(), StateError>;
}
