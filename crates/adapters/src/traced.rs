// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{NotifyAdapter, NotifyError};
use crate::state::{StateAdapter, StateError};
use async_trait::async_trait;
use pools_core::EntityState;
use tracing::Instrument;

/// Wrapper that adds tracing to any StateAdapter
#[derive(Clone)]
pub struct TracedStateAdapter<S> {
    inner: S,
}

impl<S> TracedStateAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: StateAdapter> StateAdapter for TracedStateAdapter<S> {
    async fn publish(&self, state: &EntityState) -> Result<(), StateError> {
        let span = tracing::debug_span!("state.publish", entity_id = %state.entity_id);
        async {
            let result = self.inner.publish(state).await;
            match &result {
                Ok(()) => tracing::debug!(value = %state.value, "published"),
                Err(e) => tracing::warn!(error = %e, "publish failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn remove(&self, entity_id: &str) -> Result<(), StateError> {
        let span = tracing::debug_span!("state.remove", entity_id);
        async {
            let result = self.inner.remove(entity_id).await;
            // The sink may already be gone during shutdown
            if let Err(e) = &result {
                tracing::debug!(error = %e, "remove failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", channel);
        async {
            tracing::info!(url = message, "sending");

            let start = std::time::Instant::now();
            let result = self.inner.send(channel, message).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "send failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
