// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity identity and published state

use crate::config::{LinesPoolDef, MediaPoolDef};
use crate::paths::{base_name, file_stem, nice_name, slugify};
use crate::pool::{PoolAttributes, PoolKind};
use serde::{Deserialize, Serialize};

pub const ENTITY_DOMAIN: &str = "sensor";
pub const UNIQUE_ID_PREFIX: &str = "pools";

/// Identity of one pool entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub entity_id: String,
    pub name: String,
    pub unique_id: String,
}

impl EntityDescriptor {
    /// Build from explicit settings; missing pieces are derived from the
    /// source file or folder
    pub fn new(
        kind: PoolKind,
        source: &str,
        name: &str,
        unique_id: Option<&str>,
        entity_suffix: Option<&str>,
    ) -> Self {
        let suffix = entity_suffix
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| derive_suffix(kind, source));
        let entity_id = format!("{}.{}", ENTITY_DOMAIN, suffix);
        let unique_id = unique_id
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}:{}", UNIQUE_ID_PREFIX, entity_id));
        Self {
            entity_id,
            name: name.to_string(),
            unique_id,
        }
    }

    pub fn for_lines(def: &LinesPoolDef) -> Self {
        Self::new(
            PoolKind::Lines,
            &def.file,
            &def.name,
            def.unique_id.as_deref(),
            def.entity_suffix.as_deref(),
        )
    }

    pub fn for_media(def: &MediaPoolDef) -> Self {
        Self::new(
            PoolKind::Media,
            &def.folder,
            &def.name,
            def.unique_id.as_deref(),
            def.entity_suffix.as_deref(),
        )
    }

    /// Identity for an auto-discovered file or folder; the suffix doubles as
    /// the unique id
    pub fn discovered(kind: PoolKind, source: &str) -> Self {
        let suffix = derive_suffix(kind, source);
        let name = match kind {
            PoolKind::Lines => format!("Pools Lines {}", nice_name(file_stem(source))),
            PoolKind::Media => format!("Pools Media {}", nice_name(base_name(source))),
        };
        Self::new(kind, source, &name, Some(&suffix), Some(&suffix))
    }
}

/// `pools_lines_<slug(stem)>` or `pools_media_<slug(folder)>`
pub fn derive_suffix(kind: PoolKind, source: &str) -> String {
    match kind {
        PoolKind::Lines => format!("pools_lines_{}", slugify(file_stem(source))),
        PoolKind::Media => format!("pools_media_{}", slugify(base_name(source))),
    }
}

/// Published state of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub name: String,
    pub unique_id: String,
    pub kind: PoolKind,
    pub value: String,
    pub attributes: PoolAttributes,
}

impl EntityState {
    pub fn new(
        descriptor: &EntityDescriptor,
        kind: PoolKind,
        value: String,
        attributes: PoolAttributes,
    ) -> Self {
        Self {
            entity_id: descriptor.entity_id.clone(),
            name: descriptor.name.clone(),
            unique_id: descriptor.unique_id.clone(),
            kind,
            value,
            attributes,
        }
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
