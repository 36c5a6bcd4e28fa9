// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pools_core::{SelectionMode, ServeMode};
use std::path::Path;

const FULL: &str = r#"
lines_directory = "lines"
media_directory = "media/sfx"
selection_mode = "queue"
no_repeat = 3
serve_from = "media"

[[lines_pools]]
file = "greetings.txt"
name = "Greetings"

[daemon]
socket_path = "run/poolsd.sock"
lock_path = "run/poolsd.pid"
log_path = "/var/log/poolsd.log"

[notify]
channel = "kitchen"
command = ["mpc", "play"]
"#;

#[test]
fn platform_options_sit_beside_daemon_tables() {
    let config = Config::from_toml_str(FULL, Path::new("/srv/pools")).unwrap();

    assert_eq!(config.platform.lines_directory, "lines");
    assert_eq!(config.platform.media_directory, "media/sfx");
    assert_eq!(config.platform.selection_mode, SelectionMode::Queue);
    assert_eq!(config.platform.no_repeat, 3);
    assert_eq!(config.platform.serve_from, ServeMode::Media);
    assert_eq!(config.platform.lines_pools.len(), 1);
    assert_eq!(config.notify.channel, "kitchen");
    assert_eq!(config.notify.command, vec!["mpc", "play"]);
}

#[test]
fn relative_paths_resolve_against_the_config_directory() {
    let config = Config::from_toml_str(FULL, Path::new("/srv/pools")).unwrap();

    assert_eq!(config.platform.config_root.as_deref(), Some(Path::new("/srv/pools")));
    assert_eq!(config.socket_path, Path::new("/srv/pools/run/poolsd.sock"));
    assert_eq!(config.lock_path, Path::new("/srv/pools/run/poolsd.pid"));
    assert_eq!(config.log_path, Path::new("/var/log/poolsd.log"));
}

#[test]
fn explicit_config_root_is_relative_to_the_file() {
    let toml = r#"
config_root = "home"
[daemon]
socket_path = "s.sock"
lock_path = "s.pid"
log_path = "s.log"
"#;
    let config = Config::from_toml_str(toml, Path::new("/etc/pools")).unwrap();

    assert_eq!(config.platform.root(), Path::new("/etc/pools/home"));
}

#[test]
fn invalid_platform_options_fail_fast() {
    let toml = r#"
max_lines = 0
[daemon]
socket_path = "s.sock"
lock_path = "s.pid"
log_path = "s.log"
"#;
    let result = Config::from_toml_str(toml, Path::new("/tmp"));

    assert!(matches!(
        result,
        Err(LifecycleError::Config(ConfigError::OutOfRange { field: "max_lines", .. }))
    ));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let result = Config::from_toml_str("lines_directory = [", Path::new("/tmp"));

    assert!(matches!(result, Err(LifecycleError::Config(ConfigError::Toml(_)))));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Config::load(&path).unwrap_err();

    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn load_uses_the_file_directory_as_root() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pools.toml");
    std::fs::write(
        &path,
        "[daemon]\nsocket_path = \"p.sock\"\nlock_path = \"p.pid\"\nlog_path = \"p.log\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.platform.root(), dir.path());
    assert_eq!(config.socket_path, dir.path().join("p.sock"));
}
