// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pools-core: Core library for line and media pools
//!
//! This crate provides:
//! - Typed platform configuration
//! - Directory scanning with extension and glob filtering
//! - Line pools (text files) and media pools (folders of media files)
//! - The shared selection policy (random with anti-repeat, or queue)

pub mod clock;
pub mod config;
pub mod entity;
pub mod paths;
pub mod scanner;
pub mod selection;
pub mod serve;
pub mod stats;

// Pools (order matters for dependencies)
pub mod lines;
pub mod media;
pub mod pool;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, LinesPoolDef, MediaPoolDef, NotifyConfig, PlatformConfig};
pub use entity::{EntityDescriptor, EntityState};
pub use lines::{LineAttributes, LineLimits, LinePool, LoadError, LoadedLines};
pub use media::{MediaAttributes, MediaPool};
pub use paths::NameFilter;
pub use pool::{Pool, PoolAttributes, PoolKind, PoolOps};
pub use scanner::{MediaListing, ScanError};
pub use selection::{SelectionMode, Selector};
pub use serve::ServeMode;
pub use stats::PoolStats;

/// Hard cap on the number of pools of each kind created by one platform
pub const MAX_POOLS: usize = 255;
