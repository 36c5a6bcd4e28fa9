// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Media pools: one folder, one value per matching file

use crate::paths::NameFilter;
use crate::pool::{PoolAttributes, PoolOps};
use crate::scanner::{list_media, MediaListing};
use crate::selection::{SelectionMode, Selector};
use crate::serve::ServeMode;
use crate::stats::{format_mtime, PoolStats};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttributes {
    pub dir: String,
    pub file_count: usize,
    pub last_index: Option<usize>,
    pub last_file: Option<String>,
    pub relative_url: Option<String>,
    pub absolute_url: Option<String>,
    /// Same as `absolute_url`
    pub file: Option<String>,
    pub dir_mtime: Option<String>,
    #[serde(flatten)]
    pub stats: PoolStats,
}

#[derive(Debug)]
pub struct MediaPool {
    dir: PathBuf,
    /// Media directory as configured; drives URL building
    url_root: String,
    folder: String,
    filter: NameFilter,
    serve: ServeMode,
    fallback_url: String,
    selector: Selector,
    listing: MediaListing,
    last_file: Option<String>,
    relative_url: Option<String>,
    current: String,
    stats: PoolStats,
}

impl MediaPool {
    /// `dir` is the resolved folder on disk; `url_root` and `folder` are the
    /// configured media directory and subfolder used to build URLs.
    pub fn new(
        dir: PathBuf,
        url_root: impl Into<String>,
        folder: impl Into<String>,
        filter: NameFilter,
        serve: ServeMode,
    ) -> Self {
        Self {
            dir,
            url_root: url_root.into(),
            folder: folder.into(),
            filter,
            serve,
            fallback_url: String::new(),
            selector: Selector::new(SelectionMode::default(), 0),
            listing: MediaListing::default(),
            last_file: None,
            relative_url: None,
            current: String::new(),
            stats: PoolStats::default(),
        }
    }

    pub fn with_selection(mut self, mode: SelectionMode, no_repeat: usize) -> Self {
        self.selector = Selector::new(mode, no_repeat);
        self
    }

    pub fn with_fallback_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = url.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.listing.files
    }

    pub fn last_file(&self) -> Option<&str> {
        self.last_file.as_deref()
    }

    pub fn relative_url(&self) -> Option<&str> {
        self.relative_url.as_deref()
    }

    pub fn absolute_path(&self) -> Option<PathBuf> {
        self.last_file.as_ref().map(|name| self.dir.join(name))
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// What a playback target should receive: the URL, else the absolute
    /// path, else the fallback URL
    pub fn playable(&self) -> Option<String> {
        self.relative_url
            .clone()
            .or_else(|| self.absolute_path().map(|p| p.display().to_string()))
            .or_else(|| (!self.fallback_url.is_empty()).then(|| self.fallback_url.clone()))
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

#[async_trait]
impl PoolOps for MediaPool {
    /// Folders are small, so every reload rescans regardless of `force`
    async fn reload(&mut self, _force: bool) -> bool {
        self.listing = match list_media(self.dir.clone(), self.filter.clone()).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "media scan failed");
                MediaListing::default()
            }
        };

        self.selector.retain_within(self.listing.files.len());
        if self.selector.last_index().is_none() {
            self.last_file = None;
            self.relative_url = None;
        }
        tracing::debug!(
            dir = %self.dir.display(),
            files = self.listing.files.len(),
            "media scanned"
        );
        true
    }

    fn select_next(&mut self) -> String {
        let mut rng = rand::thread_rng();
        match self.selector.pick(self.listing.files.len(), &mut rng) {
            Some(idx) => {
                let name = self.listing.files[idx].clone();
                self.relative_url = self.serve.build_url(&self.url_root, &self.folder, &name);
                self.current = name.clone();
                self.last_file = Some(name);
            }
            None => {
                self.last_file = None;
                self.relative_url = None;
                self.current = self.fallback_url.clone();
            }
        }
        self.current.clone()
    }

    fn current(&self) -> &str {
        &self.current
    }

    fn reset_stats(&mut self) {
        self.selector.clear_history();
        self.stats.reset();
    }

    fn attributes(&self) -> PoolAttributes {
        let absolute = self.absolute_path().map(|p| p.display().to_string());
        PoolAttributes::Media(MediaAttributes {
            dir: self.dir.display().to_string(),
            file_count: self.listing.files.len(),
            last_index: self.selector.last_index(),
            last_file: self.last_file.clone(),
            relative_url: self.relative_url.clone(),
            absolute_url: absolute.clone(),
            file: absolute,
            dir_mtime: self.listing.latest_mtime.map(format_mtime),
            stats: self.stats.clone(),
        })
    }

    fn stats_mut(&mut self) -> &mut PoolStats {
        &mut self.stats
    }
}

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
