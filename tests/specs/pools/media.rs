//! Media pool specs
//!
//! Verify media pools: URL building, get-media and playback.

use crate::prelude::*;

const CHIMES_ID: &str = "sensor.pools_media_chimes";

fn media_project(notify: &str) -> Project {
    let temp = Project::empty();
    temp.file("media/chimes/ding.ogg", "ogg");
    temp.file("media/chimes/readme.txt", "not media");
    temp.config(&format!(
        "lines_directory = \"lines\"\nmedia_directory = \"media\"\nserve_from = \"media\"\n{}",
        notify
    ));
    temp
}

#[test]
fn get_media_returns_url_and_path() {
    let temp = media_project("");
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-media", CHIMES_ID])
        .passes()
        .stdout_has("filename: ding.ogg")
        .stdout_has("relative_url: media-source://media_source/local/")
        .stdout_has("chimes/ding.ogg")
        .stdout_has("absolute_path: ");
}

#[test]
fn status_counts_media_pools() {
    let temp = media_project("");
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["status"])
        .passes()
        .stdout_has("Pools: 0 lines, 1 media");
}

#[test]
fn play_without_command_fails() {
    let temp = media_project("");
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["play", CHIMES_ID])
        .fails()
        .stderr_has("no playback command configured");
}

#[test]
fn play_runs_command_with_channel_and_url() {
    let temp = media_project(
        "\n[notify]\nchannel = \"kitchen\"\ncommand = [\"sh\", \"-c\", \"echo \\\"$0 $1\\\" >> played.log\"]",
    );
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["play", CHIMES_ID])
        .passes()
        .stdout_has("on kitchen");
    temp.pools()
        .args(&["play", CHIMES_ID, "--channel", "hallway"])
        .passes()
        .stdout_has("on hallway");

    let log = std::fs::read_to_string(temp.path().join("played.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("kitchen media-source://"));
    assert!(lines[0].ends_with("chimes/ding.ogg"));
    assert!(lines[1].starts_with("hallway "));
}

#[test]
fn folder_without_media_is_not_a_pool() {
    let temp = Project::empty();
    temp.file("media/notes/readme.txt", "not media");
    temp.config("lines_directory = \"lines\"\nmedia_directory = \"media\"");
    let _daemon = temp.start_daemon();

    temp.pools().args(&["list"]).passes().stdout_eq("No pools\n");
    temp.pools()
        .args(&["get-media", "sensor.pools_media_notes"])
        .fails()
        .stderr_has("entity not found: sensor.pools_media_notes");
}
