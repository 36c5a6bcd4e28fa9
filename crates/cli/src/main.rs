// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pools - command line client for the pools daemon

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod completions;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{daemon, pool};
use pools_engine::Service;

use crate::client::{resolve_socket_path, DaemonClient};
use crate::completions::{generate_completions, CompletionsArgs};
use crate::error::PoolsError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "pools",
    version,
    about = "Pools - rotating text lines and media clips"
)]
struct Cli {
    /// Daemon socket (defaults to $POOLS_SOCKET, then /tmp/pools/poolsd.sock)
    #[arg(long, global = true)]
    socket: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a new value for pools
    Shuffle(pool::TargetArgs),
    /// Re-read pools from disk and pick a new value
    Reload(pool::TargetArgs),
    /// Clear counters and selection history
    ResetStats(pool::TargetArgs),
    /// Get a line from a line pool
    GetLine(pool::ValueArgs),
    /// Get the selected file from a media pool
    GetMedia(pool::ValueArgs),
    /// Send a media pool's selection to a playback channel
    Play(pool::PlayArgs),
    /// Show the full state of one entity
    State {
        /// Entity id
        entity_id: String,
    },
    /// List every pool
    List,
    /// Show daemon status
    Status,
    /// Stop the daemon
    Stop,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let format = cli.format;
    let socket = resolve_socket_path(cli.socket);

    // Commands that don't need a live connection
    match &cli.command {
        Commands::Completions(args) => {
            generate_completions::<Cli>(args.shell);
            return Ok(());
        }
        Commands::Stop => return daemon::stop(&socket).await,
        _ => {}
    }

    let client = DaemonClient::connect(socket.clone())
        .map_err(|e| PoolsError::from_client(e, &socket))?;

    match cli.command {
        Commands::Shuffle(args) => pool::fanout(&client, Service::Shuffle, args, format).await,
        Commands::Reload(args) => pool::fanout(&client, Service::Reload, args, format).await,
        Commands::ResetStats(args) => {
            pool::fanout(&client, Service::ResetStats, args, format).await
        }
        Commands::GetLine(args) => {
            pool::call(&client, Service::GetLine, pool::value_data(&args), format).await
        }
        Commands::GetMedia(args) => {
            pool::call(&client, Service::GetMedia, pool::value_data(&args), format).await
        }
        Commands::Play(args) => {
            pool::call(&client, Service::Play, pool::play_data(&args), format).await
        }
        Commands::State { entity_id } => daemon::state(&client, &entity_id, format).await,
        Commands::List => daemon::list(&client, format).await,
        Commands::Status => daemon::status(&client, format).await,
        Commands::Stop | Commands::Completions(_) => Ok(()),
    }
}

/// Diagnostics go to stderr; quiet unless RUST_LOG asks for more
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
