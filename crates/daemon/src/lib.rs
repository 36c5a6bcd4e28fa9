// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pools daemon: configuration, lifecycle, and the socket protocol shared
//! with the CLI

pub mod config;
pub mod lifecycle;
pub mod protocol;
pub mod server;

pub use config::{default_socket_path, Config};
pub use lifecycle::{DaemonState, LifecycleError};
pub use protocol::{EntitySummary, ProtocolError, Request, Response, StatusInfo};
