// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pools engine: sensors, registry, service dispatch, and platform setup

mod discover;
mod dispatcher;
mod error;
mod platform;
mod registry;
mod sensor;
mod service;

pub use discover::PoolPlan;
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use platform::{Platform, PlatformDeps};
pub use registry::PoolRegistry;
pub use sensor::{MediaSelection, PoolSensor};
pub use service::{
    EntityTarget, FanoutReport, LineValue, MediaValue, PlayValue, Service, ServiceData,
    ServiceFailure, ServiceResponse,
};
