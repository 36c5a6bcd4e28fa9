// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op state adapter for when nothing consumes entity state.

use super::{StateAdapter, StateError};
use async_trait::async_trait;
use pools_core::EntityState;

/// State adapter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpStateAdapter;

impl NoOpStateAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StateAdapter for NoOpStateAdapter {
    async fn publish(&self, _state: &EntityState) -> Result<(), StateError> {
        Ok(())
    }

    async fn remove(&self, _entity_id: &str) -> Result<(), StateError> {
        Ok(())
    }
}
