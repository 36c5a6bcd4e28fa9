// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which pools a platform creates: declared ones, or whatever the content
//! directories hold when none are declared

use pools_core::scanner::{scan_files, scan_media_folders};
use pools_core::{EntityDescriptor, NameFilter, PlatformConfig, PoolKind, MAX_POOLS};

/// A pool to build: its identity plus the file or folder backing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolPlan {
    pub descriptor: EntityDescriptor,
    pub source: String,
}

pub async fn plan_lines(config: &PlatformConfig, filter: &NameFilter) -> Vec<PoolPlan> {
    let plans = if config.lines_pools.is_empty() {
        let dir = config.resolve(&config.lines_directory);
        let found = match scan_files(dir.clone(), filter.clone()).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "line discovery failed");
                Vec::new()
            }
        };
        tracing::debug!(dir = %dir.display(), count = found.len(), "discovered line files");
        found
            .into_iter()
            .map(|file| PoolPlan {
                descriptor: EntityDescriptor::discovered(PoolKind::Lines, &file),
                source: file,
            })
            .collect()
    } else {
        config
            .lines_pools
            .iter()
            .map(|def| PoolPlan {
                descriptor: EntityDescriptor::for_lines(def),
                source: def.file.clone(),
            })
            .collect()
    };
    cap(plans, PoolKind::Lines)
}

pub async fn plan_media(config: &PlatformConfig, filter: &NameFilter) -> Vec<PoolPlan> {
    let plans = if config.media_pools.is_empty() {
        let root = config.resolve(&config.media_directory);
        let found = match scan_media_folders(root.clone(), filter.clone()).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(dir = %root.display(), error = %e, "media discovery failed");
                Vec::new()
            }
        };
        tracing::debug!(dir = %root.display(), count = found.len(), "discovered media folders");
        found
            .into_iter()
            .map(|folder| PoolPlan {
                descriptor: EntityDescriptor::discovered(PoolKind::Media, &folder),
                source: folder,
            })
            .collect()
    } else {
        config
            .media_pools
            .iter()
            .map(|def| PoolPlan {
                descriptor: EntityDescriptor::for_media(def),
                source: def.folder.clone(),
            })
            .collect()
    };
    cap(plans, PoolKind::Media)
}

fn cap(mut plans: Vec<PoolPlan>, kind: PoolKind) -> Vec<PoolPlan> {
    if plans.len() > MAX_POOLS {
        tracing::warn!(%kind, count = plans.len(), max = MAX_POOLS, "too many pools, ignoring the rest");
        plans.truncate(MAX_POOLS);
    }
    plans
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
