// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters between pools and the outside world

pub mod notify;
pub mod state;
pub mod traced;

pub use notify::{CommandNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use state::{ChannelStateAdapter, NoOpStateAdapter, StateAdapter, StateError, StateEvent};
pub use traced::{TracedNotifyAdapter, TracedStateAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use state::{FakeStateAdapter, StateCall};
