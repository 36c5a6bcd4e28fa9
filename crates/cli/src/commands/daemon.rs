// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspection and daemon control: state, list, status, stop

use std::path::Path;

use anyhow::Result;

use crate::client::{daemon_stop, DaemonClient};
use crate::error::PoolsError;
use crate::output::{self, EntityRow, EntityView, OutputFormat, StatusView};

pub async fn state(client: &DaemonClient, entity_id: &str, format: OutputFormat) -> Result<()> {
    let entity = client
        .state(entity_id)
        .await
        .map_err(|e| PoolsError::from_client(e, client.socket_path()))?;

    match entity {
        Some(entity) => {
            output::print(&EntityView(entity), format);
            Ok(())
        }
        None => Err(PoolsError::entity_not_found(entity_id).into()),
    }
}

pub async fn list(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let rows: Vec<EntityRow> = client
        .list_entities()
        .await
        .map_err(|e| PoolsError::from_client(e, client.socket_path()))?
        .into_iter()
        .map(EntityRow)
        .collect();

    if format == OutputFormat::Text {
        if rows.is_empty() {
            println!("No pools");
            return Ok(());
        }
        println!("{}", EntityRow::HEADER);
    }
    output::print_list(&rows, format);
    Ok(())
}

pub async fn status(client: &DaemonClient, format: OutputFormat) -> Result<()> {
    let socket = client.socket_path();
    let status = client
        .status()
        .await
        .map_err(|e| PoolsError::from_client(e, socket))?;

    let cli_version = env!("CARGO_PKG_VERSION");
    if let Ok(daemon_version) = client.hello().await {
        if daemon_version != cli_version {
            eprintln!(
                "warning: daemon is version {}, CLI is {}",
                daemon_version, cli_version
            );
        }
    }

    output::print(&StatusView(status), format);
    Ok(())
}

pub async fn stop(socket_path: &Path) -> Result<()> {
    let stopped = daemon_stop(socket_path)
        .await
        .map_err(|e| PoolsError::from_client(e, socket_path))?;
    if stopped {
        println!("Daemon stopped");
    } else {
        println!("Daemon not running");
    }
    Ok(())
}
