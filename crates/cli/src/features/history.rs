// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Charging history and the charging simulator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use spot_core::{Action, ChargingSession, ChargingStatus, Entity, NewOperation, Station};

use super::HookContext;
use crate::error::Result;
use crate::notify::Toast;
use crate::sync::{Filter, Table};

/// Storage key of the cached sessions.
pub const HISTORY_KEY: &str = "chargingHistory";

/// Sessions kept, newest first.
pub const MAX_SESSIONS: usize = 20;

/// Default size of [`ChargingHistory::recent_sessions`].
pub const DEFAULT_RECENT: usize = 5;

/// Tariff in BRL per kWh.
pub const PRICE_PER_KWH: f64 = 1.95;

/// Builds a plausible session at `station` starting at `now`.
///
/// Values derive from a hash of the station and time, so the same inputs
/// give the same session: 15 to 55 minutes, 5.0 to 35.0 kWh, and roughly
/// one session in five interrupted.
pub fn simulate_session(station: &Station, now: DateTime<Utc>) -> ChargingSession {
    let millis = now.timestamp_millis();
    let digest = Sha256::digest(format!("{}:{}", station.id, millis).as_bytes());

    let duration = 15 + u32::from(digest[0]) % 41;
    let tenths = 50 + u16::from_be_bytes([digest[1], digest[2]]) % 301;
    let energy = f64::from(tenths) / 10.0;
    let cost = (energy * PRICE_PER_KWH * 100.0).round() / 100.0;
    let status = if digest[3] % 5 == 0 {
        ChargingStatus::Interrupted
    } else {
        ChargingStatus::Complete
    };

    ChargingSession {
        id: millis,
        station_id: station.id,
        station_name: station.name.clone(),
        date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        duration,
        energy,
        cost,
        status,
    }
}

/// Charging sessions of the current session, newest first.
pub struct ChargingHistory<'a> {
    ctx: HookContext<'a>,
    sessions: Vec<ChargingSession>,
}

impl<'a> ChargingHistory<'a> {
    /// Loads the history: from the remote for a signed-in user online, from
    /// the cache otherwise or when the remote fails.
    pub async fn load(ctx: HookContext<'a>) -> Result<Self> {
        let cached = ctx
            .service
            .storage()
            .get::<Vec<ChargingSession>>(HISTORY_KEY)?
            .unwrap_or_default();
        let mut history = ChargingHistory {
            ctx,
            sessions: cached,
        };

        if let (Some(user_id), true) = (ctx.user_id(), ctx.is_online()) {
            match ctx
                .service
                .remote()
                .select(Table::ChargingHistory, Filter::eq("user_id", user_id))
                .await
            {
                Ok(rows) => {
                    let mut sessions: Vec<ChargingSession> = rows
                        .into_iter()
                        .filter_map(|row| match serde_json::from_value::<SessionRow>(row) {
                            Ok(row) => Some(row.into()),
                            Err(e) => {
                                tracing::debug!(error = %e, "history: malformed row skipped");
                                None
                            }
                        })
                        .collect();
                    let queued = queued_session_ids(&ctx, user_id).await;
                    merge_local(&mut sessions, &history.sessions, &queued);
                    sessions.truncate(MAX_SESSIONS);
                    history.sessions = sessions;
                    history.persist()?;
                }
                Err(e) => tracing::warn!(error = %e, "history: using cached sessions"),
            }
        }
        Ok(history)
    }

    pub fn sessions(&self) -> &[ChargingSession] {
        &self.sessions
    }

    /// The `count` newest sessions.
    pub fn recent_sessions(&self, count: usize) -> &[ChargingSession] {
        &self.sessions[..count.min(self.sessions.len())]
    }

    /// Simulates a session at `station` now.
    pub async fn simulate_charging(&mut self, station: &Station) -> Result<ChargingSession> {
        self.simulate_charging_at(station, Utc::now()).await
    }

    /// Simulates a session at `station` starting at `now`, records it and
    /// queues it for a signed-in user.
    pub async fn simulate_charging_at(
        &mut self,
        station: &Station,
        now: DateTime<Utc>,
    ) -> Result<ChargingSession> {
        let session = simulate_session(station, now);
        self.sessions.insert(0, session.clone());
        self.sessions.truncate(MAX_SESSIONS);
        self.persist()?;

        self.ctx
            .record(
                |user| NewOperation::charging_session(Action::Create, &session, user),
                "Sessão salva localmente. Será sincronizada quando online.",
            )
            .await?;

        self.ctx.notify(Toast::success(format!(
            "Carregamento simulado em {}",
            station.name
        )));
        Ok(session)
    }

    fn persist(&self) -> Result<()> {
        Ok(self.ctx.service.storage().set(HISTORY_KEY, &self.sessions)?)
    }
}

/// Ids of sessions still waiting in the queue for `user_id`.
async fn queued_session_ids(ctx: &HookContext<'_>, user_id: &str) -> Vec<i64> {
    ctx.service
        .queue()
        .lock()
        .await
        .get_pending_operations(Some(Entity::ChargingHistory))
        .iter()
        .filter(|op| op.belongs_to(user_id) && op.action == Action::Create)
        .filter_map(|op| op.data.get("id").and_then(serde_json::Value::as_i64))
        .collect()
}

/// Adds the local sessions the remote has not seen yet, newest first.
fn merge_local(sessions: &mut Vec<ChargingSession>, local: &[ChargingSession], queued: &[i64]) {
    for session in local {
        if queued.contains(&session.id) && !sessions.iter().any(|s| s.id == session.id) {
            sessions.push(session.clone());
        }
    }
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
}

#[derive(Debug, Deserialize)]
struct SessionRow {
    id: i64,
    station_id: u32,
    #[serde(default = "unknown_station")]
    station_name: String,
    date: String,
    duration: u32,
    energy: f64,
    cost: f64,
    status: ChargingStatus,
}

fn unknown_station() -> String {
    "Estação Desconhecida".to_string()
}

impl From<SessionRow> for ChargingSession {
    fn from(row: SessionRow) -> Self {
        ChargingSession {
            id: row.id,
            station_id: row.station_id,
            station_name: row.station_name,
            date: row.date,
            duration: row.duration,
            energy: row.energy,
            cost: row.cost,
            status: row.status,
        }
    }
}
