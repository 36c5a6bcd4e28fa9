// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake state adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{StateAdapter, StateError};
use async_trait::async_trait;
use pools_core::EntityState;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded state call
#[derive(Debug, Clone, PartialEq)]
pub enum StateCall {
    Publish(Box<EntityState>),
    Remove(String),
}

/// Fake state adapter for testing
///
/// Records every call and keeps the latest state per entity.
#[derive(Clone, Default)]
pub struct FakeStateAdapter {
    calls: Arc<Mutex<Vec<StateCall>>>,
    states: Arc<Mutex<HashMap<String, EntityState>>>,
    fail_publish: Arc<Mutex<bool>>,
    failing_entities: Arc<Mutex<HashSet<String>>>,
}

impl FakeStateAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StateCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Latest published state for an entity
    pub fn state(&self, entity_id: &str) -> Option<EntityState> {
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(entity_id)
            .cloned()
    }

    /// Number of publish calls for an entity
    pub fn publish_count(&self, entity_id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StateCall::Publish(s) if s.entity_id == entity_id))
            .count()
    }

    /// Make subsequent publish calls fail
    pub fn set_fail_publish(&self, fail: bool) {
        *self.fail_publish.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Make subsequent publish calls for one entity fail
    pub fn fail_publish_for(&self, entity_id: &str) {
        self.failing_entities
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(entity_id.to_string());
    }

    fn should_fail(&self, entity_id: &str) -> bool {
        *self.fail_publish.lock().unwrap_or_else(|e| e.into_inner())
            || self
                .failing_entities
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(entity_id)
    }
}

#[async_trait]
impl StateAdapter for FakeStateAdapter {
    async fn publish(&self, state: &EntityState) -> Result<(), StateError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StateCall::Publish(Box::new(state.clone())));

        if self.should_fail(&state.entity_id) {
            return Err(StateError::Rejected {
                entity_id: state.entity_id.clone(),
                reason: "injected failure".to_string(),
            });
        }

        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(state.entity_id.clone(), state.clone());
        Ok(())
    }

    async fn remove(&self, entity_id: &str) -> Result<(), StateError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StateCall::Remove(entity_id.to_string()));
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(entity_id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
