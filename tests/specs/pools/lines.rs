//! Line pool specs
//!
//! Verify line pools end to end: discovery, selection and fan-out services.

use crate::prelude::*;

const GREETINGS_ID: &str = "sensor.pools_lines_greetings";

fn queue_project() -> Project {
    let temp = Project::empty();
    temp.file("lines/greetings.txt", GREETINGS);
    temp.file("lines/notes.md", "not a pool\n");
    temp.config(
        "lines_directory = \"lines\"\nmedia_directory = \"media\"\nselection_mode = \"queue\"",
    );
    temp
}

#[test]
fn get_line_advances_the_queue() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-line", GREETINGS_ID])
        .passes()
        .stdout_eq("hi\n");
    temp.pools()
        .args(&["get-line", GREETINGS_ID])
        .passes()
        .stdout_eq("hello\n");
}

#[test]
fn get_line_without_shuffle_keeps_current_value() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-line", GREETINGS_ID, "--no-shuffle"])
        .passes()
        .stdout_eq("hello\n");
    temp.pools()
        .args(&["get-line", GREETINGS_ID, "--no-shuffle"])
        .passes()
        .stdout_eq("hello\n");
}

#[test]
fn list_shows_discovered_text_files_only() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    let run = temp.pools().args(&["list"]).passes();
    run.stdout_has("ENTITY")
        .stdout_has(GREETINGS_ID)
        .stdout_has("lines")
        .stdout_has("hello");
    assert!(!run.stdout().contains("notes"));
}

#[test]
fn state_shows_attributes() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["state", GREETINGS_ID])
        .passes()
        .stdout_has("sensor.pools_lines_greetings (lines)")
        .stdout_has("value: hello")
        .stdout_has("line_count: 2")
        .stdout_has("greetings.txt");
}

#[test]
fn state_of_unknown_entity_fails() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["state", "sensor.nope"])
        .fails()
        .stderr_has("Entity 'sensor.nope' not found");
}

#[test]
fn shuffle_all_applies_to_every_pool() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["shuffle", "--all"])
        .passes()
        .stdout_has("1 applied");
    temp.pools()
        .args(&["get-line", GREETINGS_ID, "--no-shuffle"])
        .passes()
        .stdout_eq("hi\n");
}

#[test]
fn shuffle_reports_unknown_ids() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["shuffle", GREETINGS_ID, "sensor.nope"])
        .passes()
        .stdout_has("shuffle: 1 applied")
        .stdout_has("unknown: sensor.nope");
}

#[test]
fn reload_picks_up_edited_file() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.file("lines/greetings.txt", "bonjour\nsalut\nciao\n");
    temp.pools()
        .args(&["reload", GREETINGS_ID])
        .passes()
        .stdout_has("reload: 1 applied");

    temp.pools()
        .args(&["state", GREETINGS_ID])
        .passes()
        .stdout_has("line_count: 3");
}

#[test]
fn reset_stats_clears_counters() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-line", GREETINGS_ID])
        .passes();
    temp.pools()
        .args(&["reset-stats", GREETINGS_ID])
        .passes()
        .stdout_has("reset_stats: 1 applied");

    temp.pools()
        .args(&["state", GREETINGS_ID])
        .passes()
        .stdout_has("last_shuffle: -");
}

#[test]
fn get_line_on_media_pool_is_rejected() {
    let temp = queue_project();
    temp.file("media/chimes/ding.ogg", "ogg");
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-line", "sensor.pools_media_chimes"])
        .fails()
        .stderr_has("get_line failed");
}

#[test]
fn json_output_carries_the_full_response() {
    let temp = queue_project();
    let _daemon = temp.start_daemon();

    let json = temp
        .pools()
        .args(&["--format", "json", "get-line", GREETINGS_ID])
        .passes()
        .json();

    assert_eq!(json["ok"], true);
    assert_eq!(json["entity_id"], GREETINGS_ID);
    assert_eq!(json["value"], "hi");
    assert_eq!(json["attributes"]["line_count"], 2);
}

#[test]
fn empty_file_falls_back_to_fallback_text() {
    let temp = Project::empty();
    temp.file("lines/empty.txt", "\n\n");
    temp.config(
        "lines_directory = \"lines\"\nmedia_directory = \"media\"\nfallback_text = \"nothing yet\"",
    );
    let _daemon = temp.start_daemon();

    temp.pools()
        .args(&["get-line", "sensor.pools_lines_empty"])
        .passes()
        .stdout_eq("nothing yet\n");
}
