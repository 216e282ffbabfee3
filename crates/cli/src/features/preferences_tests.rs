// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use serde_json::{json, Map, Value};
use yare::parameterized;

use super::{parse_assignment, HookContext, Preferences, Recorded, PREFERENCES_KEY};
use crate::error::Error;
use crate::session::Session;
use crate::sync::test_helpers::TestEnv;
use crate::sync::Table;

fn updates(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[parameterized(
    string = { "theme=dark", "theme", json!("dark") },
    boolean = { "notifications=true", "notifications", json!(true) },
    number = { "radius_km = 25", "radius_km", json!(25) },
    quoted = { "city=\"Niterói\"", "city", json!("Niterói") },
    empty_value = { "note=", "note", json!("") },
)]
fn test_parse_assignment(text: &str, key: &str, value: Value) {
    assert_eq!(parse_assignment(text).unwrap(), (key.to_string(), value));
}

#[parameterized(
    no_equals = { "theme" },
    empty_key = { "=dark" },
    reserved_key = { "user_id=u2" },
)]
fn test_parse_assignment_rejects(text: &str) {
    assert!(matches!(
        parse_assignment(text),
        Err(Error::InvalidPreference(_))
    ));
}

#[tokio::test]
async fn test_set_merges_and_syncs_whole_document() {
    let env = TestEnv::new();
    let session = Session::user("u1").unwrap();
    let mut prefs = Preferences::load(HookContext::new(&env.service, &session)).unwrap();

    prefs
        .set(updates(&[("theme", json!("dark"))]))
        .await
        .unwrap();
    let recorded = prefs
        .set(updates(&[("radius_km", json!(25))]))
        .await
        .unwrap();

    assert!(matches!(recorded, Recorded::Synced(_)));
    assert_eq!(prefs.get("theme"), Some(&json!("dark")));
    assert_eq!(
        env.remote.rows(Table::Preferences).await,
        vec![json!({ "user_id": "u1", "theme": "dark", "radius_km": 25 })]
    );
    assert_eq!(
        env.notifier.toasts().last().map(|t| t.title.as_str()),
        Some("Preferências salvas")
    );
}

#[tokio::test]
async fn test_set_offline_is_cached_and_queued() {
    let env = TestEnv::with_state(false);
    let session = Session::user("u1").unwrap();
    let mut prefs = Preferences::load(HookContext::new(&env.service, &session)).unwrap();

    let recorded = prefs
        .set(updates(&[("theme", json!("light"))]))
        .await
        .unwrap();

    assert_eq!(recorded, Recorded::Queued);
    assert_eq!(env.service.status().await.pending_count, 1);

    let reloaded = Preferences::load(HookContext::new(&env.service, &session)).unwrap();
    assert_eq!(reloaded.values(), prefs.values());
    assert!(env.storage().contains(PREFERENCES_KEY).unwrap());
}

#[tokio::test]
async fn test_visitor_preferences_are_not_queued() {
    let env = TestEnv::new();
    let session = Session::Visitor;
    let mut prefs = Preferences::load(HookContext::new(&env.service, &session)).unwrap();

    let recorded = prefs
        .set(updates(&[("theme", json!("dark"))]))
        .await
        .unwrap();

    assert_eq!(recorded, Recorded::Visitor);
    assert_eq!(env.service.status().await.pending_count, 0);
    assert_eq!(env.notifier.toasts()[0].title, "Modo Visitante");
}

#[tokio::test]
async fn test_reset_deletes_remote_document() {
    let env = TestEnv::new();
    let session = Session::user("u1").unwrap();
    let mut prefs = Preferences::load(HookContext::new(&env.service, &session)).unwrap();
    prefs
        .set(updates(&[("theme", json!("dark"))]))
        .await
        .unwrap();

    prefs.reset().await.unwrap();

    assert!(prefs.values().is_empty());
    assert!(!env.storage().contains(PREFERENCES_KEY).unwrap());
    assert!(env.remote.rows(Table::Preferences).await.is_empty());
}
