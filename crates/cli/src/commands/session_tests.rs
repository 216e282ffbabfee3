// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{test_config, TestContext};
use tempfile::TempDir;

fn stored(dir: &Path) -> Option<Session> {
    Session::load(&open_storage(dir).unwrap()).unwrap()
}

#[test]
fn test_login_and_logout() {
    let dir = TempDir::new().unwrap();

    login(dir.path(), "alice").unwrap();
    assert_eq!(stored(dir.path()), Some(Session::user("alice").unwrap()));

    logout(dir.path()).unwrap();
    assert_eq!(stored(dir.path()), None);
}

#[test]
fn test_login_rejects_invalid_user() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        login(dir.path(), "not valid"),
        Err(Error::InvalidUser(_))
    ));
    assert_eq!(stored(dir.path()), None);
}

#[test]
fn test_login_creates_data_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    login(&nested, "alice").unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_visitor_mode_toggle() {
    let dir = TempDir::new().unwrap();
    visitor(dir.path(), &test_config()).unwrap();
    assert_eq!(stored(dir.path()), Some(Session::Visitor));

    let mut config = test_config();
    config.features.visitor_mode = false;
    let other = TempDir::new().unwrap();
    assert!(matches!(
        visitor(other.path(), &config),
        Err(Error::Config(_))
    ));
    assert_eq!(stored(other.path()), None);
}

#[test]
fn test_login_while_data_dir_is_held() {
    let ctx = TestContext::new();
    login(ctx.temp_dir.path(), "bob").unwrap();
    assert_eq!(stored(ctx.temp_dir.path()), Some(Session::user("bob").unwrap()));
}
