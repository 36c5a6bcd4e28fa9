// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use fs2::FileExt;
use pools_adapters::{
    ChannelStateAdapter, CommandNotifyAdapter, StateEvent, TracedNotifyAdapter,
    TracedStateAdapter,
};
use pools_core::{ConfigError, SystemClock, MAX_POOLS};
use pools_engine::{Platform, PlatformDeps};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;

/// Daemon platform with concrete adapter types (wrapped with tracing)
pub type DaemonPlatform = Platform<
    TracedStateAdapter<ChannelStateAdapter>,
    TracedNotifyAdapter<CommandNotifyAdapter>,
    SystemClock,
>;

/// Room for every pool of both kinds to publish once without the loop
/// draining the channel
pub const STATE_CHANNEL_CAPACITY: usize = 4 * MAX_POOLS;

/// Daemon state during operation
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    pub platform: DaemonPlatform,
    /// State changes published by the sensors
    pub state_events: mpsc::Receiver<StateEvent>,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl DaemonState {
    /// Log and discard every queued state change
    pub fn drain_state_events(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.state_events.try_recv() {
            log_state_event(&event);
            drained += 1;
        }
        drained
    }

    /// Shutdown the daemon gracefully
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        self.platform.teardown().await;
        self.drain_state_events();

        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock is released when self.lock_file is dropped
        info!("Daemon shutdown complete");
        Ok(())
    }
}

pub fn log_state_event(event: &StateEvent) {
    match event {
        StateEvent::Published(state) => info!(
            entity_id = %state.entity_id,
            value = %state.value,
            "state changed"
        ),
        StateEvent::Removed(entity_id) => info!(%entity_id, "entity removed"),
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to read config {0}: {1}")]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config).await {
        Ok(state) => Ok(state),
        // The lock belongs to the daemon that is already running
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Create directories for socket and lock
    for path in [&config.socket_path, &config.lock_path] {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // 2. Acquire lock file FIRST - prevents races. Opened without truncation
    //    so a failed attempt leaves the running daemon's PID intact.
    let mut lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Validate config BEFORE binding socket
    config.platform.validate()?;

    // 4. Set up adapters (wrapped with tracing for observability)
    let (state_adapter, state_events) = ChannelStateAdapter::channel(STATE_CHANNEL_CAPACITY);
    let deps = PlatformDeps {
        state: TracedStateAdapter::new(state_adapter),
        notify: TracedNotifyAdapter::new(CommandNotifyAdapter::from_config(&config.notify)),
        clock: SystemClock,
    };
    if config.notify.program().is_none() {
        info!("No notify command configured; play will report an error");
    }

    // 5. Build, register, and attach every pool
    let platform = Platform::setup(&config.platform, config.notify.clone(), deps).await?;

    // 6. Remove stale socket and bind (LAST - only after all validation passes)
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    info!(
        "Daemon started with {} pools from {}",
        platform.len(),
        config.platform.root().display()
    );

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        listener,
        platform,
        state_events,
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }

    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
