// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use std::fmt;

use clap::ValueEnum;
use pools_core::EntityState;
use pools_daemon::{EntitySummary, StatusInfo};
use pools_engine::ServiceResponse;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Result of a service call
#[derive(Serialize)]
#[serde(transparent)]
pub struct ResponseView(pub ServiceResponse);

impl fmt::Display for ResponseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ServiceResponse::Fanout(report) => {
                write!(f, "{}: {} applied", report.service, report.applied.len())?;
                if !report.unknown.is_empty() {
                    write!(f, "\n  unknown: {}", report.unknown.join(", "))?;
                }
                if !report.failed.is_empty() {
                    write!(f, "\n  failed: {}", report.failed.join(", "))?;
                }
                Ok(())
            }
            ServiceResponse::Line(line) => write!(f, "{}", line.value),
            ServiceResponse::Media(media) => {
                writeln!(f, "filename: {}", or_dash(&media.filename))?;
                writeln!(f, "relative_url: {}", or_dash(&media.relative_url))?;
                write!(f, "absolute_path: {}", or_dash(&media.absolute_path))
            }
            ServiceResponse::Play(play) => {
                write!(f, "played {} on {}", play.played, play.channel)
            }
            ServiceResponse::Failed(failure) => write!(f, "error: {}", failure.error),
        }
    }
}

/// One line of `pools list`
#[derive(Serialize)]
#[serde(transparent)]
pub struct EntityRow(pub EntitySummary);

impl EntityRow {
    pub const HEADER: &'static str = "ENTITY                                   KIND   VALUE";
}

impl fmt::Display for EntityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<40} {:<6} {}",
            self.0.entity_id,
            self.0.kind,
            or_dash(&self.0.value)
        )
    }
}

/// Full state of one entity
#[derive(Serialize)]
#[serde(transparent)]
pub struct EntityView(pub EntityState);

impl fmt::Display for EntityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = &self.0;
        writeln!(f, "{} ({})", state.entity_id, state.kind)?;
        writeln!(f, "  name: {}", state.name)?;
        writeln!(f, "  unique_id: {}", state.unique_id)?;
        write!(f, "  value: {}", or_dash(&state.value))?;

        let attributes = serde_json::to_value(&state.attributes).map_err(|_| fmt::Error)?;
        if let serde_json::Value::Object(map) = attributes {
            for (key, value) in map {
                write!(f, "\n  {}: {}", key, attribute_text(&value))?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct StatusView(pub StatusInfo);

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = &self.0;
        writeln!(f, "Status: running")?;
        writeln!(f, "Version: {}", status.version)?;
        writeln!(f, "Uptime: {}", format_uptime(status.uptime_secs))?;
        write!(
            f,
            "Pools: {} lines, {} media",
            status.lines_pools, status.media_pools
        )
    }
}

/// `3725` -> `1h 2m 5s`
pub fn format_uptime(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{}s", s),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn attribute_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => or_dash(s).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
