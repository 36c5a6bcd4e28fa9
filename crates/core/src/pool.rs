// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed set of pool kinds and the operations they share

use crate::lines::{LineAttributes, LinePool};
use crate::media::{MediaAttributes, MediaPool};
use crate::stats::PoolStats;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    Lines,
    Media,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PoolKind::Lines => "lines",
            PoolKind::Media => "media",
        })
    }
}

/// Attribute snapshot published alongside a pool's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoolAttributes {
    Lines(LineAttributes),
    Media(MediaAttributes),
}

impl PoolAttributes {
    pub fn stats(&self) -> &PoolStats {
        match self {
            PoolAttributes::Lines(attrs) => &attrs.stats,
            PoolAttributes::Media(attrs) => &attrs.stats,
        }
    }
}

/// Operations every pool supports.
///
/// `reload` and `select_next` never fail: I/O problems are logged and the
/// pool degrades to empty content and its fallback value.
#[async_trait]
pub trait PoolOps: Send {
    /// Refresh cached content from disk. Without `force` a pool may skip
    /// the read when its source is unchanged. Returns whether content was
    /// re-read.
    async fn reload(&mut self, force: bool) -> bool;

    /// Pick the next value per the selection mode and make it current
    fn select_next(&mut self) -> String;

    /// The value picked last (or the fallback)
    fn current(&self) -> &str;

    /// Clear anti-repeat history and counters; the current value is kept
    fn reset_stats(&mut self);

    fn attributes(&self) -> PoolAttributes;

    fn stats_mut(&mut self) -> &mut PoolStats;

    /// Reload if stale, pick, and count a shuffle
    async fn shuffle(&mut self, now: DateTime<Utc>) -> String {
        self.reload(false).await;
        let value = self.select_next();
        self.stats_mut().record_shuffle(now);
        value
    }

    /// Re-read unconditionally, pick, and count a reload
    async fn force_reload(&mut self, now: DateTime<Utc>) -> String {
        self.reload(true).await;
        let value = self.select_next();
        self.stats_mut().record_reload(now);
        value
    }
}

#[derive(Debug)]
pub enum Pool {
    Lines(LinePool),
    Media(MediaPool),
}

impl Pool {
    pub fn kind(&self) -> PoolKind {
        match self {
            Pool::Lines(_) => PoolKind::Lines,
            Pool::Media(_) => PoolKind::Media,
        }
    }

    pub fn as_media(&self) -> Option<&MediaPool> {
        match self {
            Pool::Media(pool) => Some(pool),
            Pool::Lines(_) => None,
        }
    }
}

impl From<LinePool> for Pool {
    fn from(pool: LinePool) -> Self {
        Pool::Lines(pool)
    }
}

impl From<MediaPool> for Pool {
    fn from(pool: MediaPool) -> Self {
        Pool::Media(pool)
    }
}

#[async_trait]
impl PoolOps for Pool {
    async fn reload(&mut self, force: bool) -> bool {
        match self {
            Pool::Lines(pool) => pool.reload(force).await,
            Pool::Media(pool) => pool.reload(force).await,
        }
    }

    fn select_next(&mut self) -> String {
        match self {
            Pool::Lines(pool) => pool.select_next(),
            Pool::Media(pool) => pool.select_next(),
        }
    }

    fn current(&self) -> &str {
        match self {
            Pool::Lines(pool) => pool.current(),
            Pool::Media(pool) => pool.current(),
        }
    }

    fn reset_stats(&mut self) {
        match self {
            Pool::Lines(pool) => pool.reset_stats(),
            Pool::Media(pool) => pool.reset_stats(),
        }
    }

    fn attributes(&self) -> PoolAttributes {
        match self {
            Pool::Lines(pool) => pool.attributes(),
            Pool::Media(pool) => pool.attributes(),
        }
    }

    fn stats_mut(&mut self) -> &mut PoolStats {
        match self {
            Pool::Lines(pool) => pool.stats_mut(),
            Pool::Media(pool) => pool.stats_mut(),
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
