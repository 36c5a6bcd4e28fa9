// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service names, call payloads, and responses

use crate::error::DispatchError;
use pools_core::PoolAttributes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Shuffle,
    Reload,
    ResetStats,
    ShuffleAll,
    ReloadAll,
    GetLine,
    GetMedia,
    Play,
}

impl Service {
    pub const ALL: [Service; 8] = [
        Service::Shuffle,
        Service::Reload,
        Service::ResetStats,
        Service::ShuffleAll,
        Service::ReloadAll,
        Service::GetLine,
        Service::GetMedia,
        Service::Play,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Shuffle => "shuffle",
            Service::Reload => "reload",
            Service::ResetStats => "reset_stats",
            Service::ShuffleAll => "shuffle_all",
            Service::ReloadAll => "reload_all",
            Service::GetLine => "get_line",
            Service::GetMedia => "get_media",
            Service::Play => "play",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| DispatchError::UnknownService(s.to_string()))
    }
}

/// `entity_id` accepts a single id or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityTarget {
    One(String),
    Many(Vec<String>),
}

impl EntityTarget {
    /// Non-blank ids, in the order given
    pub fn ids(&self) -> Vec<String> {
        let ids: Vec<&String> = match self {
            EntityTarget::One(id) => vec![id],
            EntityTarget::Many(ids) => ids.iter().collect(),
        };
        ids.into_iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Payload of a service call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ServiceData {
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(EntityTarget::One(entity_id.into())),
            ..Self::default()
        }
    }

    pub fn for_entities(ids: Vec<String>) -> Self {
        Self {
            entity_id: Some(EntityTarget::Many(ids)),
            ..Self::default()
        }
    }

    pub fn all() -> Self {
        Self {
            all: Some(true),
            ..Self::default()
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = Some(shuffle);
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn target_ids(&self) -> Vec<String> {
        self.entity_id.as_ref().map(EntityTarget::ids).unwrap_or_default()
    }

    /// Fan-out targets everything when `all` is set or no id is given
    pub fn targets_all(&self) -> bool {
        self.all.unwrap_or(false) || self.target_ids().is_empty()
    }

    /// The one id a data-returning service acts on
    pub fn single_target(&self) -> Result<String, DispatchError> {
        let mut ids = self.target_ids();
        match ids.len() {
            0 => Err(DispatchError::MissingEntityId),
            1 => Ok(ids.remove(0)),
            n => Err(DispatchError::MultipleTargets(n)),
        }
    }

    pub fn shuffle_first(&self) -> bool {
        self.shuffle.unwrap_or(true)
    }
}

/// Summary of a fan-out call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanoutReport {
    pub ok: bool,
    pub service: String,
    /// Ids the operation completed on
    pub applied: Vec<String>,
    /// Requested ids with no registered pool
    pub unknown: Vec<String>,
    /// Ids whose task did not complete
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineValue {
    pub ok: bool,
    pub entity_id: String,
    pub value: String,
    pub attributes: PoolAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaValue {
    pub ok: bool,
    pub entity_id: String,
    /// Displayed state of the entity
    pub filename: String,
    pub relative_url: String,
    pub absolute_path: String,
    pub attributes: PoolAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayValue {
    #[serde(flatten)]
    pub media: MediaValue,
    pub channel: String,
    /// What was sent to the channel
    pub played: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFailure {
    pub ok: bool,
    pub error: String,
}

impl From<DispatchError> for ServiceFailure {
    fn from(e: DispatchError) -> Self {
        Self {
            ok: false,
            error: e.to_string(),
        }
    }
}

/// Response to any service call
///
/// Variant order matters for untagged decoding: richer shapes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Fanout(FanoutReport),
    Play(PlayValue),
    Line(LineValue),
    Media(MediaValue),
    Failed(ServiceFailure),
}

impl ServiceResponse {
    pub fn is_ok(&self) -> bool {
        match self {
            ServiceResponse::Fanout(r) => r.ok,
            ServiceResponse::Play(r) => r.media.ok,
            ServiceResponse::Line(r) => r.ok,
            ServiceResponse::Media(r) => r.ok,
            ServiceResponse::Failed(_) => false,
        }
    }
}

impl From<DispatchError> for ServiceResponse {
    fn from(e: DispatchError) -> Self {
        ServiceResponse::Failed(e.into())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
