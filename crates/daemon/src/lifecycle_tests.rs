// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pools_core::{NotifyConfig, PlatformConfig};
use std::fs;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> Config {
    let lines = dir.path().join("lines");
    fs::create_dir_all(&lines).unwrap();
    fs::write(lines.join("greetings.txt"), "hello\n").unwrap();

    Config {
        socket_path: dir.path().join("run/poolsd.sock"),
        lock_path: dir.path().join("run/poolsd.pid"),
        log_path: dir.path().join("poolsd.log"),
        platform: PlatformConfig {
            config_root: Some(dir.path().to_path_buf()),
            lines_directory: "lines".to_string(),
            media_directory: "media".to_string(),
            ..PlatformConfig::default()
        },
        notify: NotifyConfig::default(),
    }
}

#[tokio::test]
async fn startup_binds_socket_and_attaches_pools() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let mut daemon = startup(&config).await.unwrap();

    assert!(config.socket_path.exists());
    let pid = fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert_eq!(daemon.platform.len(), 1);
    // one publish per pool from attach
    assert_eq!(daemon.drain_state_events(), 1);

    daemon.shutdown().await.unwrap();
}

#[tokio::test]
async fn second_instance_is_refused_without_touching_the_lock() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut first = startup(&config).await.unwrap();

    let second = startup(&config).await;

    assert!(matches!(second, Err(LifecycleError::LockFailed(_))));
    let pid = fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert!(config.socket_path.exists());

    first.shutdown().await.unwrap();
}

#[tokio::test]
async fn stale_socket_is_replaced() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::create_dir_all(config.socket_path.parent().unwrap()).unwrap();
    fs::write(&config.socket_path, b"stale").unwrap();

    let mut daemon = startup(&config).await.unwrap();

    assert!(config.socket_path.exists());
    daemon.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_config_cleans_up_and_never_binds() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.platform.no_repeat = 5000;

    let result = startup(&config).await;

    assert!(matches!(result, Err(LifecycleError::Config(_))));
    assert!(!config.socket_path.exists());
    assert!(!config.lock_path.exists());
}

#[tokio::test]
async fn shutdown_removes_files_and_withdraws_entities() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut daemon = startup(&config).await.unwrap();

    daemon.shutdown().await.unwrap();

    assert!(!config.socket_path.exists());
    assert!(!config.lock_path.exists());
    assert!(daemon.platform.is_empty());
}
