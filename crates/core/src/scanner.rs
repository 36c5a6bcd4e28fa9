// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory scanning for pool content
//!
//! The `*_blocking` functions touch the filesystem directly; the async
//! wrappers push them onto tokio's blocking pool. A missing root is an empty
//! result, never an error.

use crate::paths::NameFilter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tokio::task::JoinError;

/// Most files one media folder contributes to its pool
pub const MAX_MEDIA_FILES: usize = 255;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("scan task failed: {0}")]
    Join(#[from] JoinError),
}

impl ScanError {
    fn io(path: &Path, source: io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Files of one media folder plus the newest modification time among them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaListing {
    pub files: Vec<String>,
    pub latest_mtime: Option<SystemTime>,
}

/// Sorted names of regular files in `dir` accepted by `filter`
pub fn scan_files_blocking(dir: &Path, filter: &NameFilter) -> Result<Vec<String>, ScanError> {
    let Some(entries) = read_dir_if_exists(dir)? else {
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !filter.accepts(&name) {
            continue;
        }
        if entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Sorted names of immediate subfolders of `root` holding at least one
/// accepted file. Unreadable subfolders count as empty.
pub fn scan_media_folders_blocking(
    root: &Path,
    filter: &NameFilter,
) -> Result<Vec<String>, ScanError> {
    let Some(entries) = read_dir_if_exists(root)? else {
        return Ok(Vec::new());
    };

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        match scan_files_blocking(&path, filter) {
            Ok(files) if !files.is_empty() => folders.push(name),
            Ok(_) => {}
            Err(e) => tracing::debug!(folder = %path.display(), error = %e, "skipping unreadable folder"),
        }
    }
    folders.sort();
    Ok(folders)
}

/// List accepted files of one media folder with their newest mtime.
/// Files that vanish between listing and stat are skipped.
/// Only the first `MAX_MEDIA_FILES` names in sorted order are kept.
pub fn list_media_blocking(dir: &Path, filter: &NameFilter) -> Result<MediaListing, ScanError> {
    let mut names = scan_files_blocking(dir, filter)?;
    if names.len() > MAX_MEDIA_FILES {
        tracing::warn!(
            dir = %dir.display(),
            found = names.len(),
            kept = MAX_MEDIA_FILES,
            "media folder over cap, extra files ignored"
        );
        names.truncate(MAX_MEDIA_FILES);
    }

    let mut listing = MediaListing::default();
    for name in names {
        let path = dir.join(&name);
        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ScanError::io(&path, e)),
        };
        listing.latest_mtime = Some(match listing.latest_mtime {
            Some(latest) if latest >= modified => latest,
            _ => modified,
        });
        listing.files.push(name);
    }
    Ok(listing)
}

pub async fn scan_files(dir: PathBuf, filter: NameFilter) -> Result<Vec<String>, ScanError> {
    tokio::task::spawn_blocking(move || scan_files_blocking(&dir, &filter)).await?
}

pub async fn scan_media_folders(
    root: PathBuf,
    filter: NameFilter,
) -> Result<Vec<String>, ScanError> {
    tokio::task::spawn_blocking(move || scan_media_folders_blocking(&root, &filter)).await?
}

pub async fn list_media(dir: PathBuf, filter: NameFilter) -> Result<MediaListing, ScanError> {
    tokio::task::spawn_blocking(move || list_media_blocking(&dir, &filter)).await?
}

fn read_dir_if_exists(dir: &Path) -> Result<Option<fs::ReadDir>, ScanError> {
    if !dir.is_dir() {
        return Ok(None);
    }
    match fs::read_dir(dir) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScanError::io(dir, e)),
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
