// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::Config;
use crate::lifecycle::startup;
use pools_adapters::{FakeNotifyAdapter, FakeStateAdapter};
use pools_core::{FakeClock, NotifyConfig, PlatformConfig, SelectionMode};
use pools_engine::{PlatformDeps, ServiceData, ServiceResponse};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GREETINGS: &str = "sensor.pools_lines_greetings";

fn write_content(root: &Path) {
    let lines = root.join("lines");
    let chimes = root.join("media/chimes");
    fs::create_dir_all(&lines).unwrap();
    fs::create_dir_all(&chimes).unwrap();
    fs::write(lines.join("greetings.txt"), "hello\nhi\n").unwrap();
    fs::write(chimes.join("ding.ogg"), b"x").unwrap();
}

fn platform_config(root: &Path) -> PlatformConfig {
    PlatformConfig {
        config_root: Some(root.to_path_buf()),
        lines_directory: "lines".to_string(),
        media_directory: "media".to_string(),
        selection_mode: SelectionMode::Queue,
        ..PlatformConfig::default()
    }
}

async fn fake_platform(
    tmp: &TempDir,
) -> Platform<FakeStateAdapter, FakeNotifyAdapter, FakeClock> {
    write_content(tmp.path());
    Platform::setup(
        &platform_config(tmp.path()),
        NotifyConfig::default(),
        PlatformDeps {
            state: FakeStateAdapter::new(),
            notify: FakeNotifyAdapter::new(),
            clock: FakeClock::new(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn ping_and_hello() {
    let tmp = TempDir::new().unwrap();
    let platform = fake_platform(&tmp).await;

    assert_eq!(
        handle_request(&platform, Instant::now(), Request::Ping).await,
        Response::Pong
    );
    assert_eq!(
        handle_request(
            &platform,
            Instant::now(),
            Request::Hello {
                version: "0.0.1".to_string()
            }
        )
        .await,
        Response::Hello {
            version: PROTOCOL_VERSION.to_string()
        }
    );
}

#[tokio::test]
async fn call_routes_to_the_dispatcher() {
    let tmp = TempDir::new().unwrap();
    let platform = fake_platform(&tmp).await;

    let response = handle_request(
        &platform,
        Instant::now(),
        Request::Call {
            service: "get_line".to_string(),
            data: ServiceData::for_entity(GREETINGS),
        },
    )
    .await;

    match response {
        Response::Service {
            result: ServiceResponse::Line(line),
        } => {
            // attach showed "hello"; get_line shuffles first
            assert_eq!(line.value, "hi");
        }
        other => panic!("Expected line value, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_service_is_a_failed_result() {
    let tmp = TempDir::new().unwrap();
    let platform = fake_platform(&tmp).await;

    let response = handle_request(
        &platform,
        Instant::now(),
        Request::Call {
            service: "explode".to_string(),
            data: ServiceData::default(),
        },
    )
    .await;

    match response {
        Response::Service { result } => assert!(!result.is_ok()),
        other => panic!("Expected service response, got {:?}", other),
    }
}

#[tokio::test]
async fn state_lookup_trims_the_id() {
    let tmp = TempDir::new().unwrap();
    let platform = fake_platform(&tmp).await;

    let found = handle_request(
        &platform,
        Instant::now(),
        Request::State {
            entity_id: format!(" {} ", GREETINGS),
        },
    )
    .await;
    let missing = handle_request(
        &platform,
        Instant::now(),
        Request::State {
            entity_id: "sensor.nope".to_string(),
        },
    )
    .await;

    match found {
        Response::State { entity: Some(entity) } => assert_eq!(entity.value, "hello"),
        other => panic!("Expected state, got {:?}", other),
    }
    assert_eq!(missing, Response::State { entity: None });
}

#[tokio::test]
async fn list_and_status_count_pools() {
    let tmp = TempDir::new().unwrap();
    let platform = fake_platform(&tmp).await;

    let Response::Entities { entities } =
        handle_request(&platform, Instant::now(), Request::ListEntities).await
    else {
        panic!("Expected entities");
    };
    let ids: Vec<_> = entities.iter().map(|e| e.entity_id.as_str()).collect();
    assert_eq!(ids, vec![GREETINGS, "sensor.pools_media_chimes"]);

    let Response::Status(status) =
        handle_request(&platform, Instant::now(), Request::Status).await
    else {
        panic!("Expected status");
    };
    assert_eq!(status.lines_pools, 1);
    assert_eq!(status.media_pools, 1);
    assert_eq!(status.version, PROTOCOL_VERSION);
}

#[tokio::test]
async fn shutdown_over_the_socket_sets_the_flag() {
    let tmp = TempDir::new().unwrap();
    write_content(tmp.path());
    let config = Config {
        socket_path: tmp.path().join("poolsd.sock"),
        lock_path: tmp.path().join("poolsd.pid"),
        log_path: tmp.path().join("poolsd.log"),
        platform: platform_config(tmp.path()),
        notify: NotifyConfig::default(),
    };
    let mut daemon = startup(&config).await.unwrap();

    let socket = config.socket_path.clone();
    let client = tokio::spawn(async move {
        let stream = UnixStream::connect(&socket).await.unwrap();
        let (mut reader, mut writer) = stream.into_split();
        let data = protocol::encode(&Request::Shutdown).unwrap();
        protocol::write_message(&mut writer, &data).await.unwrap();
        let bytes = protocol::read_message(&mut reader).await.unwrap();
        protocol::decode::<Response>(&bytes).unwrap()
    });

    let (stream, _) = daemon.listener.accept().await.unwrap();
    handle_connection(&mut daemon, stream).await.unwrap();

    assert_eq!(client.await.unwrap(), Response::ShuttingDown);
    assert!(daemon.shutdown_requested);
    daemon.shutdown().await.unwrap();
}
