// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use std::time::Instant;

use pools_adapters::{NotifyAdapter, StateAdapter};
use pools_core::{Clock, PoolKind};
use pools_engine::Platform;
use tokio::net::UnixStream;
use tracing::{debug, error};

use crate::lifecycle::DaemonState;
use crate::protocol::{
    self, EntitySummary, Request, Response, StatusInfo, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};

/// Handle a single client connection
pub async fn handle_connection(
    daemon: &mut DaemonState,
    stream: UnixStream,
) -> Result<(), ServerError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    let response = if matches!(request, Request::Shutdown) {
        daemon.shutdown_requested = true;
        Response::ShuttingDown
    } else {
        handle_request(&daemon.platform, daemon.start_time, request).await
    };

    debug!("Sending response: {:?}", response);

    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
pub async fn handle_request<S, N, C>(
    platform: &Platform<S, N, C>,
    start_time: Instant,
    request: Request,
) -> Response
where
    S: StateAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Call { service, data } => Response::Service {
            result: platform.dispatcher().call_by_name(&service, data).await,
        },

        Request::State { entity_id } => Response::State {
            entity: platform.state(entity_id.trim()).map(Box::new),
        },

        Request::ListEntities => Response::Entities {
            entities: platform.entities().iter().map(EntitySummary::from).collect(),
        },

        Request::Status => {
            let entities = platform.entities();
            let lines_pools = entities
                .iter()
                .filter(|e| e.kind == PoolKind::Lines)
                .count();
            Response::Status(StatusInfo {
                version: PROTOCOL_VERSION.to_string(),
                uptime_secs: start_time.elapsed().as_secs(),
                lines_pools,
                media_pools: entities.len() - lines_pools,
            })
        }

        // Only the connection handler can stop the loop
        Request::Shutdown => Response::Error {
            message: "shutdown must go through the daemon socket".to_string(),
        },
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
