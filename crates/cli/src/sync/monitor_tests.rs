// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use super::monitor::*;
use super::test_helpers::serve_once;

fn monitor(reachable: bool, online: bool) -> (Arc<FixedProbe>, NetworkMonitor) {
    let probe = Arc::new(FixedProbe::new(reachable));
    let monitor = NetworkMonitor::new(probe.clone(), online);
    (probe, monitor)
}

#[test]
fn test_initial_state() {
    let (_, online) = monitor(true, true);
    assert!(online.is_online());
    assert!(online.last_online().is_some());

    let (_, offline) = monitor(true, false);
    assert!(!offline.is_online());
    assert!(offline.last_online().is_none());
}

#[test]
fn test_set_online_stamps_last_online() {
    let (_, monitor) = monitor(true, false);
    monitor.set_online(true);
    assert!(monitor.is_online());
    assert!(monitor.last_online().is_some());

    monitor.set_online(false);
    assert!(!monitor.is_online());
    assert!(monitor.last_online().is_some());
}

#[test]
fn test_clones_share_state() {
    let (_, monitor) = monitor(true, true);
    let other = monitor.clone();
    other.set_online(false);
    assert!(!monitor.is_online());
}

#[test]
fn test_subscribers_only_see_transitions() {
    let (_, monitor) = monitor(true, true);
    let mut rx = monitor.subscribe();

    monitor.set_online(true);
    assert!(!rx.has_changed().unwrap());

    monitor.set_online(false);
    assert!(rx.has_changed().unwrap());
    assert!(!*rx.borrow_and_update());

    monitor.set_online(false);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_check_does_not_touch_flag() {
    let (probe, monitor) = monitor(false, true);
    assert!(!monitor.check_actual_connectivity().await);
    assert!(monitor.is_online());

    probe.set(true);
    monitor.set_online(false);
    assert!(monitor.check_actual_connectivity().await);
    assert!(!monitor.is_online());
}

#[tokio::test]
async fn test_refresh_stores_probe_answer() {
    let (probe, monitor) = monitor(false, true);
    assert!(!monitor.refresh().await);
    assert!(!monitor.is_online());

    probe.set(true);
    assert!(monitor.refresh().await);
    assert!(monitor.is_online());
}

#[tokio::test]
async fn test_http_probe_success() {
    let (url, handle) = serve_once("200 OK", "").await;
    let probe = HttpProbe::new(&url, Duration::from_secs(5));

    assert!(probe.check().await);

    let request = handle.await.unwrap();
    assert!(request.starts_with("HEAD /?timestamp="));
    assert!(request.to_lowercase().contains("cache-control: no-cache"));
}

#[tokio::test]
async fn test_http_probe_rejects_error_status() {
    let (url, _handle) = serve_once("503 Service Unavailable", "").await;
    let probe = HttpProbe::new(&url, Duration::from_secs(5));
    assert!(!probe.check().await);
}

#[tokio::test]
async fn test_http_probe_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let probe = HttpProbe::new(&format!("http://{}", addr), Duration::from_secs(2));
    assert!(!probe.check().await);
}

#[tokio::test]
async fn test_http_probe_times_out_on_silent_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let probe = HttpProbe::new(&format!("http://{}", addr), Duration::from_millis(100));
    let started = std::time::Instant::now();

    assert!(!probe.check().await);
    assert!(started.elapsed() < Duration::from_secs(5));
}
