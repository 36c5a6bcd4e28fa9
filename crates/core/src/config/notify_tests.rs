// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_has_channel_and_no_command() {
    let config = NotifyConfig::default();
    assert_eq!(config.channel, DEFAULT_CHANNEL);
    assert!(config.program().is_none());
}

#[test]
fn program_splits_command() {
    let config = NotifyConfig {
        channel: "kitchen".to_string(),
        command: vec!["mpv".to_string(), "--no-video".to_string()],
    };
    let (program, args) = config.program().unwrap();
    assert_eq!(program, "mpv");
    assert_eq!(args, &["--no-video".to_string()]);
}

#[test]
fn blank_program_is_ignored() {
    let config = NotifyConfig {
        channel: "kitchen".to_string(),
        command: vec![" ".to_string()],
    };
    assert!(config.program().is_none());
}

#[test]
fn requested_channel_overrides_default() {
    let config = NotifyConfig::default();
    assert_eq!(config.channel_or_default(Some("speaker")), "speaker");
    assert_eq!(config.channel_or_default(Some("  ")), DEFAULT_CHANNEL);
    assert_eq!(config.channel_or_default(None), DEFAULT_CHANNEL);
}
