// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for service dispatch

use pools_adapters::NotifyError;
use pools_core::PoolKind;
use thiserror::Error;

/// Failures reported back to a service caller
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing entity_id")]
    MissingEntityId,
    #[error("expected a single entity_id, got {0}")]
    MultipleTargets(usize),
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error("{entity_id} is not a {expected} pool")]
    KindMismatch {
        entity_id: String,
        expected: PoolKind,
    },
    #[error("nothing to play for {0}")]
    NothingToPlay(String),
    #[error("playback failed: {0}")]
    Notify(#[from] NotifyError),
    #[error("unknown service: {0}")]
    UnknownService(String),
}
