// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of live pool sensors, keyed by entity id
//!
//! Entries are weak: the platform's sensor list owns the sensors, so a
//! dropped sensor simply stops resolving.

use crate::sensor::PoolSensor;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};

pub struct PoolRegistry<S, C> {
    entries: RwLock<BTreeMap<String, Weak<PoolSensor<S, C>>>>,
}

impl<S, C> Default for PoolRegistry<S, C> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<S, C> PoolRegistry<S, C>
where
    S: pools_adapters::StateAdapter,
    C: pools_core::Clock,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sensor; returns false if a live sensor already holds the id
    pub fn register(&self, sensor: &Arc<PoolSensor<S, C>>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let id = sensor.entity_id().to_string();
        if entries.get(&id).is_some_and(|w| w.strong_count() > 0) {
            return false;
        }
        entries.insert(id, Arc::downgrade(sensor));
        true
    }

    pub fn unregister(&self, entity_id: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(entity_id)
            .is_some()
    }

    pub fn get(&self, entity_id: &str) -> Option<Arc<PoolSensor<S, C>>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(entity_id)
            .and_then(Weak::upgrade)
    }

    /// Every live sensor, ordered by entity id
    pub fn all(&self) -> Vec<Arc<PoolSensor<S, C>>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Ids of every live sensor, ordered
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(_, w)| w.strong_count() > 0)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
