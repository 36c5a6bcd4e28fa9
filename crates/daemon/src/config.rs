// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file
//!
//! The platform options live at the top level of the TOML document, next to
//! optional `[daemon]` and `[notify]` tables.

use std::path::{Path, PathBuf};

use pools_core::{ConfigError, NotifyConfig, PlatformConfig};
use serde::Deserialize;

use crate::lifecycle::LifecycleError;

/// Config file used when none is given
pub const DEFAULT_CONFIG_FILE: &str = "pools.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct DaemonSection {
    socket_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    lock_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    platform: PlatformConfig,
    #[serde(default)]
    daemon: DaemonSection,
    #[serde(default)]
    notify: NotifyConfig,
}

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    pub platform: PlatformConfig,
    pub notify: NotifyConfig,
}

impl Config {
    /// Load a config file. Relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, LifecycleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LifecycleError::ConfigRead(path.to_path_buf(), e))?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_toml_str(&content, &base)
    }

    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, LifecycleError> {
        let file: ConfigFile = toml::from_str(content).map_err(ConfigError::from)?;
        let mut platform = file.platform;
        platform.config_root = Some(match platform.config_root.take() {
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        });
        platform.validate()?;

        let socket_path = match file.daemon.socket_path {
            Some(path) => base.join(path),
            None => default_socket_path(),
        };
        let lock_path = match file.daemon.lock_path {
            Some(path) => base.join(path),
            None => state_dir()?.join("poolsd.pid"),
        };
        let log_path = match file.daemon.log_path {
            Some(path) => base.join(path),
            None => state_dir()?.join("poolsd.log"),
        };

        Ok(Self {
            socket_path,
            lock_path,
            log_path,
            platform,
            notify: file.notify,
        })
    }
}

/// Socket directory, overridable with `POOLS_SOCKET_DIR`
///
/// Kept under /tmp so socket paths stay short (macOS SUN_LEN = 104).
pub fn socket_dir() -> PathBuf {
    match std::env::var("POOLS_SOCKET_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("/tmp/pools"),
    }
}

/// Where the daemon listens unless configured otherwise
pub fn default_socket_path() -> PathBuf {
    socket_dir().join("poolsd.sock")
}

/// State directory for lock and log files
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("pools"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/pools"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
