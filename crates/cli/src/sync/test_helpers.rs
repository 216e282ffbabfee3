// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use spot_core::{Action, LocalStorage, NewOperation};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::memory::MemoryRemote;
use super::monitor::FixedProbe;
use super::service::{SyncService, SyncSettings};
use crate::notify::RecordingNotifier;

/// Create a favorites `create` operation for `user_id`.
pub fn favorite_op(station_id: u32, user_id: &str) -> NewOperation {
    NewOperation::favorite(Action::Create, station_id, user_id)
}

/// A sync service over a temporary directory with in-memory collaborators.
pub struct TestEnv {
    pub dir: TempDir,
    pub remote: MemoryRemote,
    pub probe: Arc<FixedProbe>,
    pub notifier: RecordingNotifier,
    pub service: SyncService,
}

impl TestEnv {
    /// Starts online with a reachable probe.
    pub fn new() -> Self {
        Self::with_state(true)
    }

    /// Starts with both the cached flag and the probe set to `online`.
    pub fn with_state(online: bool) -> Self {
        let dir = TempDir::new().unwrap();
        let remote = MemoryRemote::new();
        let probe = Arc::new(FixedProbe::new(online));
        let notifier = RecordingNotifier::new();
        let service = open_service(&dir, &remote, &probe, &notifier, online);
        TestEnv {
            dir,
            remote,
            probe,
            notifier,
            service,
        }
    }

    /// Drops the service and opens a fresh one over the same directory.
    pub fn reopen(self) -> Self {
        let TestEnv {
            dir,
            remote,
            probe,
            notifier,
            service,
        } = self;
        let online = service.monitor().is_online();
        drop(service);
        let service = open_service(&dir, &remote, &probe, &notifier, online);
        TestEnv {
            dir,
            remote,
            probe,
            notifier,
            service,
        }
    }

    /// Flips both the cached flag and the probe.
    pub fn set_online(&self, online: bool) {
        self.probe.set(online);
        self.service.monitor().set_online(online);
    }

    pub fn storage(&self) -> LocalStorage {
        LocalStorage::open(self.dir.path()).unwrap()
    }
}

fn open_service(
    dir: &TempDir,
    remote: &MemoryRemote,
    probe: &Arc<FixedProbe>,
    notifier: &RecordingNotifier,
    online: bool,
) -> SyncService {
    let storage = LocalStorage::open(dir.path()).unwrap();
    SyncService::open(
        SyncSettings {
            max_retries: 3,
            interval: Duration::from_secs(300),
        },
        storage,
        Arc::new(remote.clone()),
        probe.clone(),
        Arc::new(notifier.clone()),
        online,
    )
    .unwrap()
}

/// Serves exactly one HTTP request, answering with `status` and `body`.
/// The join handle yields the raw request text.
pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    serve_after_drops(0, status, body).await
}

/// Like [`serve_once`], but first closes `drops` connections without
/// answering.
pub async fn serve_after_drops(
    drops: usize,
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        for _ in 0..drops {
            let (socket, _) = listener.accept().await.unwrap();
            drop(socket);
        }
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        l.to_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{}", addr), handle)
}
