// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service commands: shuffle, reload, reset-stats, get-line, get-media, play

use anyhow::Result;
use clap::Args;
use pools_engine::{Service, ServiceData, ServiceResponse};

use crate::client::DaemonClient;
use crate::error::PoolsError;
use crate::output::{self, OutputFormat, ResponseView};

#[derive(Args)]
pub struct TargetArgs {
    /// Entity ids to act on
    #[arg(required_unless_present = "all")]
    pub entity_ids: Vec<String>,

    /// Act on every pool
    #[arg(long, conflicts_with = "entity_ids")]
    pub all: bool,
}

#[derive(Args)]
pub struct ValueArgs {
    /// Entity id
    pub entity_id: String,

    /// Return the current value without picking a new one
    #[arg(long)]
    pub no_shuffle: bool,
}

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub value: ValueArgs,

    /// Playback channel (defaults to the daemon's configured channel)
    #[arg(long)]
    pub channel: Option<String>,
}

/// Which service a fan-out command maps to; `--all` on shuffle and reload
/// uses the dedicated `_all` services
pub fn fanout_service(base: Service, all: bool) -> Service {
    match (base, all) {
        (Service::Shuffle, true) => Service::ShuffleAll,
        (Service::Reload, true) => Service::ReloadAll,
        (service, _) => service,
    }
}

pub fn target_data(args: &TargetArgs) -> ServiceData {
    if args.all {
        ServiceData::all()
    } else {
        ServiceData::for_entities(args.entity_ids.clone())
    }
}

pub fn value_data(args: &ValueArgs) -> ServiceData {
    ServiceData::for_entity(args.entity_id.clone()).with_shuffle(!args.no_shuffle)
}

pub fn play_data(args: &PlayArgs) -> ServiceData {
    let data = value_data(&args.value);
    match &args.channel {
        Some(channel) => data.with_channel(channel.clone()),
        None => data,
    }
}

pub async fn fanout(
    client: &DaemonClient,
    base: Service,
    args: TargetArgs,
    format: OutputFormat,
) -> Result<()> {
    let service = fanout_service(base, args.all);
    call(client, service, target_data(&args), format).await
}

/// Call a service and print its result; failures exit non-zero
pub async fn call(
    client: &DaemonClient,
    service: Service,
    data: ServiceData,
    format: OutputFormat,
) -> Result<()> {
    let response = client
        .call(service, data)
        .await
        .map_err(|e| PoolsError::from_client(e, client.socket_path()))?;

    match (&response, format) {
        (ServiceResponse::Failed(failure), OutputFormat::Text) => {
            Err(PoolsError::service_failed(service.as_str(), &failure.error).into())
        }
        _ => {
            let ok = response.is_ok();
            output::print(&ResponseView(response), format);
            if ok {
                Ok(())
            } else {
                Err(PoolsError::new(format!("{} failed", service)).into())
            }
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
