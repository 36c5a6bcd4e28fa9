// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use pools_core::EntityState;
use pools_daemon::protocol::{self, ProtocolError};
use pools_daemon::{EntitySummary, Request, Response, StatusInfo};
use pools_engine::{Service, ServiceData, ServiceResponse};
use thiserror::Error;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("POOLS_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for the daemon to exit
pub fn timeout_exit() -> Duration {
    parse_duration_ms("POOLS_TIMEOUT_EXIT_MS").unwrap_or(Duration::from_secs(2))
}

/// Polling interval for retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("POOLS_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running")]
    DaemonNotRunning,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Socket to talk to: `--socket`, then `POOLS_SOCKET`, then the daemon default
pub fn resolve_socket_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("POOLS_SOCKET").ok().map(PathBuf::from))
        .unwrap_or_else(pools_daemon::default_socket_path)
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to an existing daemon
    pub fn connect(socket_path: PathBuf) -> Result<Self, ClientError> {
        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }

        Ok(Self { socket_path })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn send_with_timeout(
        &self,
        request: Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        tracing::debug!(socket = %self.socket_path.display(), ?request, "sending request");
        let stream = match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => stream,
            // A socket file with nobody listening is left over from a crash
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
                return Err(ClientError::DaemonNotRunning)
            }
            Err(e) => return Err(e.into()),
        };
        let (mut reader, mut writer) = stream.into_split();

        let data = protocol::encode(&request)?;
        tokio::time::timeout(write_timeout, protocol::write_message(&mut writer, &data))
            .await
            .map_err(|_| ProtocolError::Timeout)??;

        let response_bytes =
            tokio::time::timeout(read_timeout, protocol::read_message(&mut reader))
                .await
                .map_err(|_| ProtocolError::Timeout)??;

        let response: Response = protocol::decode(&response_bytes)?;
        Ok(response)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Invoke a service; a failed result is still `Ok` here
    pub async fn call(
        &self,
        service: Service,
        data: ServiceData,
    ) -> Result<ServiceResponse, ClientError> {
        match self
            .send(Request::Call {
                service: service.as_str().to_string(),
                data,
            })
            .await?
        {
            Response::Service { result } => Ok(result),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn state(&self, entity_id: &str) -> Result<Option<EntityState>, ClientError> {
        match self
            .send(Request::State {
                entity_id: entity_id.to_string(),
            })
            .await?
        {
            Response::State { entity } => Ok(entity.map(|b| *b)),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn list_entities(&self) -> Result<Vec<EntitySummary>, ClientError> {
        match self.send(Request::ListEntities).await? {
            Response::Entities { entities } => Ok(entities),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon status
    pub async fn status(&self) -> Result<StatusInfo, ClientError> {
        match self.send(Request::Status).await? {
            Response::Status(status) => Ok(status),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        match self.send(Request::Shutdown).await? {
            Response::ShuttingDown => Ok(()),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Get daemon version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        match self
            .send(Request::Hello {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await?
        {
            Response::Hello { version } => Ok(version),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

/// Stop the daemon and wait for its socket to go away.
/// Returns true if daemon was stopped, false if it wasn't running
pub async fn daemon_stop(socket_path: &Path) -> Result<bool, ClientError> {
    let client = match DaemonClient::connect(socket_path.to_path_buf()) {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => return Ok(false),
        Err(e) => return Err(e),
    };

    match client.shutdown().await {
        Ok(()) => {}
        Err(ClientError::DaemonNotRunning) => return Ok(false),
        Err(e) => return Err(e),
    }

    wait_for_socket_removal(socket_path, timeout_exit()).await;
    Ok(true)
}

async fn wait_for_socket_removal(socket_path: &Path, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !socket_path.exists() {
            return true;
        }
        tokio::time::sleep(poll_interval()).await;
    }
    false
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
