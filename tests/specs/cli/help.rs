//! CLI help specs
//!
//! Verify help and version output without a daemon.

use crate::prelude::*;

#[test]
fn help_lists_service_commands() {
    let temp = Project::empty();

    let run = temp.pools().args(&["--help"]).passes();
    for command in [
        "shuffle",
        "reload",
        "reset-stats",
        "get-line",
        "get-media",
        "play",
        "state",
        "list",
        "status",
        "stop",
    ] {
        run.stdout_has(command);
    }
}

#[test]
fn version_prints_package_version() {
    let temp = Project::empty();

    temp.pools()
        .args(&["--version"])
        .passes()
        .stdout_eq(&format!("pools {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn play_help_mentions_channel() {
    let temp = Project::empty();

    temp.pools()
        .args(&["play", "--help"])
        .passes()
        .stdout_has("--channel")
        .stdout_has("--no-shuffle");
}

#[test]
fn completions_need_no_daemon() {
    let temp = Project::empty();

    temp.pools()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("pools");
}
