//! CLI error specs
//!
//! Verify failures are reported clearly when nothing is listening.

use crate::prelude::*;

#[test]
fn list_without_daemon_fails() {
    let temp = Project::empty();

    temp.pools()
        .args(&["list"])
        .fails()
        .stderr_has("Daemon not running")
        .stderr_has("poolsd.sock");
}

#[test]
fn get_line_without_daemon_suggests_starting_it() {
    let temp = Project::empty();

    temp.pools()
        .args(&["get-line", "sensor.pools_lines_greetings"])
        .fails()
        .stderr_has("Daemon not running")
        .stderr_has("poolsd");
}

#[test]
fn stop_without_daemon_is_not_an_error() {
    let temp = Project::empty();

    temp.pools()
        .args(&["stop"])
        .passes()
        .stdout_has("Daemon not running");
}

#[test]
fn shuffle_needs_targets_or_all() {
    let temp = Project::empty();

    temp.pools().args(&["shuffle"]).fails();
    temp.pools()
        .args(&["shuffle", "sensor.a", "--all"])
        .fails()
        .stderr_has("cannot be used with");
}

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();

    temp.pools()
        .args(&["explode"])
        .fails()
        .stderr_has("unrecognized subcommand");
}
