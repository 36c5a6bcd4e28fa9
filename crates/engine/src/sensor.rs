// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sensor entity: mirrors one pool's value and attributes to the host

use pools_adapters::{StateAdapter, StateError};
use pools_core::{Clock, EntityDescriptor, EntityState, Pool, PoolKind, PoolOps};
use std::sync::Mutex;
use tokio::sync::Mutex as AsyncMutex;

/// Details of a media pool's current pick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSelection {
    pub filename: Option<String>,
    pub relative_url: Option<String>,
    pub absolute_path: Option<String>,
    /// URL, else absolute path, else fallback URL
    pub playable: Option<String>,
}

/// One pool exposed as an entity.
///
/// The async mutex serializes operations on the pool; the snapshot holds
/// the last published state for cheap reads.
pub struct PoolSensor<S, C> {
    descriptor: EntityDescriptor,
    kind: PoolKind,
    pool: AsyncMutex<Pool>,
    snapshot: Mutex<EntityState>,
    state: S,
    clock: C,
}

impl<S: StateAdapter, C: Clock> PoolSensor<S, C> {
    pub fn new(descriptor: EntityDescriptor, pool: Pool, state: S, clock: C) -> Self {
        let kind = pool.kind();
        let snapshot = EntityState::new(
            &descriptor,
            kind,
            pool.current().to_string(),
            pool.attributes(),
        );
        Self {
            descriptor,
            kind,
            pool: AsyncMutex::new(pool),
            snapshot: Mutex::new(snapshot),
            state,
            clock,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.descriptor.entity_id
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Last published state
    pub fn snapshot(&self) -> EntityState {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// First publish after registration: force a reload so the initial
    /// value comes from disk
    pub async fn attach(&self) -> Result<EntityState, StateError> {
        tracing::debug!(entity_id = self.entity_id(), "attaching");
        self.reload().await
    }

    /// Reload if stale, pick the next value, publish
    pub async fn shuffle(&self) -> Result<EntityState, StateError> {
        let mut pool = self.pool.lock().await;
        pool.shuffle(self.clock.now()).await;
        self.publish(&pool).await
    }

    /// Re-read from disk, pick, publish
    pub async fn reload(&self) -> Result<EntityState, StateError> {
        let mut pool = self.pool.lock().await;
        pool.force_reload(self.clock.now()).await;
        self.publish(&pool).await
    }

    /// Clear counters and history, republish with the value unchanged
    pub async fn reset(&self) -> Result<EntityState, StateError> {
        let mut pool = self.pool.lock().await;
        pool.reset_stats();
        self.publish(&pool).await
    }

    /// Current media pick; `None` for line pools
    pub async fn media_selection(&self) -> Option<MediaSelection> {
        let pool = self.pool.lock().await;
        let media = pool.as_media()?;
        Some(MediaSelection {
            filename: media.last_file().map(str::to_string),
            relative_url: media.relative_url().map(str::to_string),
            absolute_path: media.absolute_path().map(|p| p.display().to_string()),
            playable: media.playable(),
        })
    }

    /// Withdraw the entity from the host
    pub async fn detach(&self) {
        if let Err(e) = self.state.remove(self.entity_id()).await {
            tracing::debug!(entity_id = self.entity_id(), error = %e, "detach failed");
        }
    }

    /// The snapshot is updated even when the adapter rejects the state
    async fn publish(&self, pool: &Pool) -> Result<EntityState, StateError> {
        let state = EntityState::new(
            &self.descriptor,
            self.kind,
            pool.current().to_string(),
            pool.attributes(),
        );
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = state.clone();

        if let Err(e) = self.state.publish(&state).await {
            tracing::warn!(entity_id = self.entity_id(), error = %e, "failed to publish state");
            return Err(e);
        }
        Ok(state)
    }
}

#[cfg(test)]
#[path = "sensor_tests.rs"]
mod tests;
