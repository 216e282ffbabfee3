// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use spot_core::{catalog, ChargingSession, ChargingStatus, Station};
use yare::parameterized;

use super::{
    simulate_session, ChargingHistory, HookContext, Recorded, DEFAULT_RECENT, HISTORY_KEY,
    MAX_SESSIONS, PRICE_PER_KWH,
};
use crate::session::Session;
use crate::sync::test_helpers::TestEnv;
use crate::sync::{RemoteStore, Table};

fn station(id: u32) -> Station {
    catalog::find(id).unwrap()
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

#[parameterized(
    icarai = { 5, 39, 9.6, 18.72, ChargingStatus::Complete },
    ipanema = { 3, 23, 31.8, 62.01, ChargingStatus::Interrupted },
)]
fn test_simulate_session_is_deterministic(
    station_id: u32,
    duration: u32,
    energy: f64,
    cost: f64,
    status: ChargingStatus,
) {
    let session = simulate_session(&station(station_id), noon());

    assert_eq!(session.id, 1_792_411_200_000);
    assert_eq!(session.station_id, station_id);
    assert_eq!(session.date, "2026-10-19T12:00:00.000Z");
    assert_eq!(session.duration, duration);
    assert_eq!(session.energy, energy);
    assert_eq!(session.cost, cost);
    assert_eq!(session.status, status);
    assert_eq!(session, simulate_session(&station(station_id), noon()));
}

#[test]
fn test_simulated_values_stay_in_range() {
    let station = station(2);
    let sessions: Vec<ChargingSession> = (0..200)
        .map(|i| simulate_session(&station, noon() + Duration::minutes(i)))
        .collect();

    for s in &sessions {
        assert!((15..=55).contains(&s.duration), "duration {}", s.duration);
        assert!((5.0..=35.0).contains(&s.energy), "energy {}", s.energy);
        assert_eq!(s.energy, (s.energy * 10.0).round() / 10.0);
        assert_eq!(s.cost, (s.energy * PRICE_PER_KWH * 100.0).round() / 100.0);
    }
    let interrupted = sessions
        .iter()
        .filter(|s| s.status == ChargingStatus::Interrupted)
        .count();
    assert_eq!(interrupted, 39);
}

#[tokio::test]
async fn test_online_simulation_syncs() {
    let env = TestEnv::new();
    let session = Session::user("u1").unwrap();
    let mut history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    let recorded = history
        .simulate_charging_at(&station(5), noon())
        .await
        .unwrap();

    assert_eq!(history.sessions(), &[recorded.clone()]);
    let rows = env.remote.rows(Table::ChargingHistory).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], "u1");
    assert_eq!(rows[0]["id"], 1_792_411_200_000_i64);
    assert_eq!(rows[0]["station_name"], "Posto Icaraí");
    assert_eq!(rows[0]["status"], "completo");

    let titles: Vec<String> = env.notifier.toasts().into_iter().map(|t| t.title).collect();
    assert_eq!(
        titles,
        vec![
            "1 item sincronizado com sucesso".to_string(),
            "Carregamento simulado em Posto Icaraí".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_offline_simulation_is_queued_and_cached() {
    let env = TestEnv::with_state(false);
    let session = Session::user("u1").unwrap();
    let mut history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    history
        .simulate_charging_at(&station(3), noon())
        .await
        .unwrap();

    assert_eq!(env.service.status().await.pending_count, 1);
    assert_eq!(env.remote.calls(), 0);

    let cached: Vec<ChargingSession> = env.storage().get(HISTORY_KEY).unwrap().unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, 1_792_411_200_000);

    let toasts = env.notifier.toasts();
    assert_eq!(toasts[0].title, "Modo Offline");
    assert_eq!(
        toasts[0].description.as_deref(),
        Some("Sessão salva localmente. Será sincronizada quando online.")
    );
    assert_eq!(toasts[1].title, "Carregamento simulado em Ponto Carga Ipanema");
}

#[tokio::test]
async fn test_visitor_simulation_is_not_queued() {
    let env = TestEnv::new();
    let session = Session::Visitor;
    let mut history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    history
        .simulate_charging_at(&station(1), noon())
        .await
        .unwrap();

    assert_eq!(history.sessions().len(), 1);
    assert_eq!(env.service.status().await.pending_count, 0);
    let titles: Vec<String> = env.notifier.toasts().into_iter().map(|t| t.title).collect();
    assert_eq!(
        titles,
        vec![
            "Modo Visitante".to_string(),
            "Carregamento simulado em Centro Carregamento Copacabana".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_history_is_capped_newest_first() {
    let env = TestEnv::with_state(false);
    let session = Session::user("u1").unwrap();
    let mut history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    for i in 0..25 {
        history
            .simulate_charging_at(&station(6), noon() + Duration::minutes(i))
            .await
            .unwrap();
    }

    assert_eq!(history.sessions().len(), MAX_SESSIONS);
    let newest = (noon() + Duration::minutes(24)).timestamp_millis();
    assert_eq!(history.sessions()[0].id, newest);
    assert_eq!(history.recent_sessions(DEFAULT_RECENT).len(), 5);
    assert_eq!(history.recent_sessions(DEFAULT_RECENT)[0].id, newest);
    assert_eq!(history.recent_sessions(100).len(), MAX_SESSIONS);
}

#[tokio::test]
async fn test_load_reads_remote_rows() {
    let env = TestEnv::new();
    let rows = [
        json!({
            "id": 1, "user_id": "u1", "station_id": 4, "station_name": "Estação Shopping Niterói",
            "date": "2026-10-01T10:00:00.000Z", "duration": 30, "energy": 10.0, "cost": 19.5,
            "status": "completo"
        }),
        json!({
            "id": 2, "user_id": "u1", "station_id": 99,
            "date": "2026-10-02T10:00:00.000Z", "duration": 20, "energy": 8.0, "cost": 15.6,
            "status": "interrompido"
        }),
        json!({ "id": 3, "user_id": "u1", "station_id": 1 }),
        json!({
            "id": 4, "user_id": "u2", "station_id": 1, "station_name": "x",
            "date": "2026-10-03T10:00:00.000Z", "duration": 20, "energy": 8.0, "cost": 15.6,
            "status": "completo"
        }),
    ];
    for row in rows {
        env.remote.insert(Table::ChargingHistory, row).await.unwrap();
    }

    let session = Session::user("u1").unwrap();
    let history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    let ids: Vec<i64> = history.sessions().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(history.sessions()[0].station_name, "Estação Desconhecida");
    assert_eq!(history.sessions()[0].status, ChargingStatus::Interrupted);
}

#[tokio::test]
async fn test_load_keeps_sessions_still_queued() {
    let env = TestEnv::with_state(false);
    let session = Session::user("u1").unwrap();
    {
        let mut history = ChargingHistory::load(HookContext::new(&env.service, &session))
            .await
            .unwrap();
        history
            .simulate_charging_at(&station(7), noon())
            .await
            .unwrap();
    }

    env.set_online(true);
    let history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    assert!(env.remote.rows(Table::ChargingHistory).await.is_empty());
    assert_eq!(history.sessions().len(), 1);
}

#[tokio::test]
async fn test_load_drops_cached_sessions_the_remote_lacks() {
    let env = TestEnv::new();
    let stale = simulate_session(&station(8), noon());
    env.storage().set(HISTORY_KEY, &vec![stale]).unwrap();

    let session = Session::user("u1").unwrap();
    let history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    assert!(history.sessions().is_empty());
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_cache() {
    let env = TestEnv::new();
    let cached = simulate_session(&station(8), noon());
    env.storage().set(HISTORY_KEY, &vec![cached.clone()]).unwrap();
    env.remote.set_failing(true);

    let session = Session::user("u1").unwrap();
    let history = ChargingHistory::load(HookContext::new(&env.service, &session))
        .await
        .unwrap();

    assert_eq!(history.sessions().len(), 1);
    assert_eq!(history.sessions()[0].id, cached.id);
}

#[tokio::test]
async fn test_recorded_outcome_offline() {
    let env = TestEnv::with_state(false);
    let session = Session::user("u1").unwrap();
    let ctx = HookContext::new(&env.service, &session);
    let sample = simulate_session(&station(9), noon());

    let recorded = ctx
        .record(
            |user| spot_core::NewOperation::charging_session(spot_core::Action::Create, &sample, user),
            "note",
        )
        .await
        .unwrap();

    assert_eq!(recorded, Recorded::Queued);
}
