//! Daemon lifecycle specs
//!
//! Verify poolsd start/status/stop and startup failures.

use crate::prelude::*;

#[test]
fn status_shows_running_daemon() {
    let temp = Project::empty();
    temp.file("lines/greetings.txt", GREETINGS);
    temp.config("lines_directory = \"lines\"\nmedia_directory = \"media\"");
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["status"])
        .passes()
        .stdout_has("Status: running")
        .stdout_has("Version:")
        .stdout_has("Uptime:")
        .stdout_has("Pools: 1 lines, 0 media");
}

#[test]
fn stop_shuts_down_and_removes_socket() {
    let temp = Project::empty();
    temp.config("lines_directory = \"lines\"\nmedia_directory = \"media\"");
    let daemon = temp.start_daemon();
    assert!(temp.socket().exists());

    temp.pools()
        .args(&["stop"])
        .passes()
        .stdout_has("Daemon stopped");

    assert!(daemon.wait().success());
    assert!(!temp.socket().exists());
    assert!(!temp.path().join("run/poolsd.pid").exists());
}

#[test]
fn status_fails_after_stop() {
    let temp = Project::empty();
    temp.config("lines_directory = \"lines\"\nmedia_directory = \"media\"");
    let daemon = temp.start_daemon();
    temp.pools().args(&["stop"]).passes();
    daemon.wait();

    temp.pools()
        .args(&["status"])
        .fails()
        .stderr_has("Daemon not running");
}

#[test]
fn log_records_startup_and_state_changes() {
    let temp = Project::empty();
    temp.file("lines/greetings.txt", GREETINGS);
    temp.config("lines_directory = \"lines\"\nmedia_directory = \"media\"");
    let daemon = temp.start_daemon();
    temp.pools().args(&["stop"]).passes();
    daemon.wait();

    let log = std::fs::read_to_string(temp.path().join("poolsd.log")).unwrap();
    assert!(log.contains("poolsd: starting"));
    assert!(log.contains("Daemon ready"));
    assert!(log.contains("state changed"));
}

#[test]
fn invalid_config_fails_fast() {
    let temp = Project::empty();
    temp.config("no_repeat = 5000");

    temp.poolsd()
        .fails()
        .stderr_has("no_repeat must be between 0 and 1000");
    assert!(!temp.socket().exists());
}

#[test]
fn missing_config_names_the_file() {
    let temp = Project::empty();

    temp.poolsd().fails().stderr_has("pools.toml");
}
