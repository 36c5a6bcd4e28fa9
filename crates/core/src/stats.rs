// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shuffle/reload counters shared by both pool kinds

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::SystemTime;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub shuffle_count: u64,
    pub reload_count: u64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_shuffle: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_reload: Option<DateTime<Utc>>,
}

impl PoolStats {
    pub fn record_shuffle(&mut self, at: DateTime<Utc>) {
        self.shuffle_count += 1;
        self.last_shuffle = Some(trim_to_seconds(at));
    }

    pub fn record_reload(&mut self, at: DateTime<Utc>) {
        self.reload_count += 1;
        self.last_reload = Some(trim_to_seconds(at));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn trim_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}

/// Filesystem modification time as an RFC 3339 UTC string
pub fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Utc>::from(mtime).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// RFC 3339 with second precision, `null` when absent
pub fn serialize_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(at) => serializer.serialize_some(&at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
