// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.remote.url, "file:remote");
    assert_eq!(config.sync.max_retries, 3);
    assert_eq!(config.sync.interval_secs, 300);
    assert_eq!(config.sync.probe_url, DEFAULT_PROBE_URL);
    assert!(config.features.visitor_mode);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[remote]\nurl = \"https://db.example.test\"\napi_key = \"anon\"\n\n[sync]\nmax_retries = 5\n",
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.remote.url, "https://db.example.test");
    assert_eq!(config.remote.api_key.as_deref(), Some("anon"));
    assert_eq!(config.remote.timeout_ms, 10_000);
    assert_eq!(config.sync.max_retries, 5);
    assert_eq!(config.sync.probe_timeout_ms, 5_000);
    assert!(config.features.visitor_mode);
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.sync.probe_url = String::new();
    config.features.visitor_mode = false;
    config.save(dir.path()).unwrap();

    assert_eq!(Config::load(dir.path()).unwrap(), config);
}

#[test]
fn test_invalid_toml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[sync\n").unwrap();
    let err = Config::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_zero_interval_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[sync]\ninterval_secs = 0\n").unwrap();
    assert!(matches!(
        Config::load(dir.path()).unwrap_err(),
        Error::Config(_)
    ));
}

#[test]
fn test_remote_overrides() {
    let config = Config::default().with_remote_overrides(Some("memory:".into()), None);
    assert_eq!(config.remote.url, "memory:");
    assert_eq!(config.remote.api_key, None);

    let config = config.with_remote_overrides(None, Some("key".into()));
    assert_eq!(config.remote.url, "memory:");
    assert_eq!(config.remote.api_key.as_deref(), Some("key"));
}

#[test]
fn test_durations() {
    let config = Config::default();
    assert_eq!(config.sync_settings().max_retries, 3);
    assert_eq!(config.sync_settings().interval, Duration::from_secs(300));
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.probe_timeout(), Duration::from_secs(5));
}

#[test]
fn test_resolve_data_dir_order() {
    let explicit = Some(PathBuf::from("/explicit"));
    let xdg = Some(PathBuf::from("/xdg"));
    let platform = Some(PathBuf::from("/platform"));

    assert_eq!(
        resolve_data_dir(explicit, xdg.clone(), platform.clone()).unwrap(),
        PathBuf::from("/explicit")
    );
    assert_eq!(
        resolve_data_dir(None, xdg, platform.clone()).unwrap(),
        PathBuf::from("/xdg/electrospot")
    );
    assert_eq!(
        resolve_data_dir(None, None, platform).unwrap(),
        PathBuf::from("/platform/electrospot")
    );
    assert!(resolve_data_dir(None, None, None).is_err());
}
