// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serve modes: turning a picked media file into a client-usable URL

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for files served from the web-local (`www`) directory
pub const LOCAL_URL_PREFIX: &str = "/local";
/// Prefix for files exposed through the local media source
pub const MEDIA_SOURCE_PREFIX: &str = "media-source://media_source/local";

/// How a selected media filename is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// `www` if the root lives below a `www` directory, `media` if below a
    /// `media` directory, otherwise `component`
    Auto,
    /// `/local/<subpath>/<file>`
    #[serde(alias = "local")]
    Www,
    /// `media-source://media_source/local/<subpath>/<file>`
    Media,
    /// No public URL; only the absolute path is exposed
    #[default]
    #[serde(alias = "none")]
    Component,
}

impl fmt::Display for ServeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServeMode::Auto => "auto",
            ServeMode::Www => "www",
            ServeMode::Media => "media",
            ServeMode::Component => "component",
        };
        write!(f, "{}", name)
    }
}

impl ServeMode {
    /// Resolve `Auto` against the configured media root
    pub fn resolve(self, root: &str) -> ServeMode {
        match self {
            ServeMode::Auto if has_segment(root, "www") => ServeMode::Www,
            ServeMode::Auto if has_segment(root, "media") => ServeMode::Media,
            ServeMode::Auto => ServeMode::Component,
            other => other,
        }
    }

    /// Build the URL for `file` in `folder` under `root`, if this mode
    /// publishes one
    pub fn build_url(self, root: &str, folder: &str, file: &str) -> Option<String> {
        match self.resolve(root) {
            ServeMode::Www => Some(join_url(
                LOCAL_URL_PREFIX,
                &subpath_after(root, "www"),
                folder,
                file,
            )),
            ServeMode::Media => Some(join_url(
                MEDIA_SOURCE_PREFIX,
                &subpath_after(root, "media"),
                folder,
                file,
            )),
            ServeMode::Auto | ServeMode::Component => None,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// `segment` appears with at least one more component after it, so a root
/// that merely ends in `media` is not treated as served
fn has_segment(path: &str, segment: &str) -> bool {
    let parts: Vec<&str> = segments(path).collect();
    parts
        .iter()
        .take(parts.len().saturating_sub(1))
        .any(|s| *s == segment)
}

/// Portion of `root` after the first `segment`; the whole root when absent
fn subpath_after(root: &str, segment: &str) -> String {
    let parts: Vec<&str> = segments(root).collect();
    let start = parts
        .iter()
        .position(|s| *s == segment)
        .map_or(0, |pos| pos + 1);
    parts[start..].join("/")
}

fn join_url(prefix: &str, subpath: &str, folder: &str, file: &str) -> String {
    let mut url = prefix.to_string();
    for part in [subpath, folder.trim_matches('/'), file] {
        if !part.is_empty() {
            url.push('/');
            url.push_str(part);
        }
    }
    url
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
