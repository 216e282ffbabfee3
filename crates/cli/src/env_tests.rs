// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::ELECTROSPOT_DIR, "ELECTROSPOT_DIR");
    assert_eq!(vars::ELECTROSPOT_REMOTE_URL, "ELECTROSPOT_REMOTE_URL");
    assert_eq!(vars::ELECTROSPOT_API_KEY, "ELECTROSPOT_API_KEY");
    assert_eq!(vars::XDG_DATA_HOME, "XDG_DATA_HOME");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
    assert_eq!(vars::COLOR, "COLOR");
}

#[test]
fn test_no_color() {
    std::env::remove_var("NO_COLOR");
    assert!(!no_color());
    std::env::set_var("NO_COLOR", "true");
    assert!(!no_color());
    std::env::set_var("NO_COLOR", "1");
    assert!(no_color());
    std::env::remove_var("NO_COLOR");
}

#[test]
fn test_force_color() {
    std::env::remove_var("COLOR");
    assert!(!force_color());
    std::env::set_var("COLOR", "yes");
    assert!(!force_color());
    std::env::set_var("COLOR", "1");
    assert!(force_color());
    std::env::remove_var("COLOR");
}

#[test]
fn test_data_dir() {
    std::env::remove_var("ELECTROSPOT_DIR");
    assert_eq!(data_dir(), None);
    std::env::set_var("ELECTROSPOT_DIR", "");
    assert_eq!(data_dir(), None);
    std::env::set_var("ELECTROSPOT_DIR", "/tmp/spot-test");
    assert_eq!(data_dir(), Some(PathBuf::from("/tmp/spot-test")));
    std::env::remove_var("ELECTROSPOT_DIR");
}

#[test]
fn test_xdg_data_home() {
    std::env::set_var("XDG_DATA_HOME", "/tmp/xdg-data");
    assert_eq!(xdg_data_home(), Some(PathBuf::from("/tmp/xdg-data")));
    std::env::remove_var("XDG_DATA_HOME");
    assert_eq!(xdg_data_home(), None);
}

#[test]
fn test_remote_overrides() {
    std::env::set_var("ELECTROSPOT_REMOTE_URL", "memory:");
    std::env::set_var("ELECTROSPOT_API_KEY", "anon");
    assert_eq!(remote_url().as_deref(), Some("memory:"));
    assert_eq!(api_key().as_deref(), Some("anon"));
    std::env::remove_var("ELECTROSPOT_REMOTE_URL");
    std::env::remove_var("ELECTROSPOT_API_KEY");
    assert_eq!(remote_url(), None);
    assert_eq!(api_key(), None);
}
