// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selection policy shared by line and media pools
//!
//! - `queue` walks the entries in order and wraps around.
//! - `random` draws uniformly among entries not in the anti-repeat history.
//!   The most recent picks are excluded first; the oldest history entries are
//!   ignored when excluding them would leave no candidate.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// How the next entry is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Random,
    Queue,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Random => write!(f, "random"),
            SelectionMode::Queue => write!(f, "queue"),
        }
    }
}

/// Cursor plus bounded anti-repeat history over an indexed collection
#[derive(Debug, Clone)]
pub struct Selector {
    mode: SelectionMode,
    no_repeat: usize,
    history: VecDeque<usize>,
    last_index: Option<usize>,
}

impl Selector {
    pub fn new(mode: SelectionMode, no_repeat: usize) -> Self {
        Self {
            mode,
            no_repeat,
            history: VecDeque::with_capacity(no_repeat),
            last_index: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Recent picks, oldest first
    pub fn history(&self) -> impl Iterator<Item = usize> + '_ {
        self.history.iter().copied()
    }

    /// Pick the next index in `0..len`, or `None` for an empty collection
    pub fn pick<R: Rng>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let idx = match self.mode {
            SelectionMode::Queue => match self.last_index {
                Some(last) => (last + 1) % len,
                None => 0,
            },
            SelectionMode::Random => {
                let candidates = self.candidates(len);
                candidates[rng.gen_range(0..candidates.len())]
            }
        };

        self.last_index = Some(idx);
        if self.no_repeat > 0 {
            self.history.push_back(idx);
            while self.history.len() > self.no_repeat {
                self.history.pop_front();
            }
        }
        Some(idx)
    }

    /// Indices allowed for the next random draw; never empty when `len > 0`
    fn candidates(&self, len: usize) -> Vec<usize> {
        let mut candidates: Vec<usize> = (0..len).collect();
        for recent in self.history.iter().rev() {
            if candidates.len() <= 1 {
                break;
            }
            if let Some(pos) = candidates.iter().position(|c| c == recent) {
                candidates.remove(pos);
            }
        }
        candidates
    }

    /// Forget the anti-repeat history; the cursor is kept
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop cursor and history entries that no longer index into `len` entries
    pub fn retain_within(&mut self, len: usize) {
        self.history.retain(|&i| i < len);
        if self.last_index.is_some_and(|i| i >= len) {
            self.last_index = None;
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
