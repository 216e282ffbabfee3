// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use spot_core::{ChargingSession, Station, SyncOperation, SyncStatus};

use crate::colors;
use crate::sync::StatusSnapshot;

/// Variant of the status indicator, mapped to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Offline,
    Busy,
    Synced,
    Idle,
}

/// Short label and explanation of the sync indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub tone: Tone,
    pub label: String,
    pub tooltip: String,
}

/// Indicator for `snapshot` as seen at `now`.
///
/// - not online → `Offline`
/// - syncing → `Sincronizando`
/// - synced less than a minute ago → `Sincronizado`, otherwise `Nmin atrás`
/// - otherwise `Online`
pub fn indicator(snapshot: &StatusSnapshot, now: DateTime<Utc>) -> Indicator {
    if !snapshot.is_online {
        return Indicator {
            tone: Tone::Offline,
            label: "Offline".to_string(),
            tooltip: "Modo offline. Dados serão sincronizados quando voltar online.".to_string(),
        };
    }
    if snapshot.is_syncing {
        return Indicator {
            tone: Tone::Busy,
            label: "Sincronizando".to_string(),
            tooltip: "Sincronizando dados com o servidor...".to_string(),
        };
    }
    if let Some(last) = snapshot.last_successful_sync {
        let minutes = (now - last).num_minutes().max(0);
        let label = if minutes < 1 {
            "Sincronizado".to_string()
        } else {
            format!("{}min atrás", minutes)
        };
        return Indicator {
            tone: Tone::Synced,
            label,
            tooltip: format!(
                "Última sincronização: {}",
                last.with_timezone(&chrono::Local).format("%H:%M:%S")
            ),
        };
    }
    Indicator {
        tone: Tone::Idle,
        label: "Online".to_string(),
        tooltip: "Conectado ao servidor".to_string(),
    }
}

fn paint_tone(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Offline => colors::error(text),
        Tone::Busy => colors::warning(text),
        Tone::Synced => colors::success(text),
        Tone::Idle => colors::literal(text),
    }
}

/// Multi-line status block for `spot status`.
pub fn format_status(snapshot: &StatusSnapshot, now: DateTime<Utc>, color: bool) -> Vec<String> {
    let ind = indicator(snapshot, now);
    let label = if color {
        paint_tone(ind.tone, &ind.label)
    } else {
        ind.label.clone()
    };

    let stamp = |at: Option<DateTime<Utc>>| {
        at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    };

    vec![
        format!("{} ({})", label, ind.tooltip),
        format!("pending: {}", snapshot.pending_count),
        format!("last attempt: {}", stamp(snapshot.last_sync_attempt)),
        format!("last success: {}", stamp(snapshot.last_successful_sync)),
    ]
}

/// One queue row: id, entity/action, status, retries and the last error.
pub fn format_operation(op: &SyncOperation, max_retries: u32) -> String {
    let status = match op.sync_status {
        SyncStatus::Failed if op.is_exhausted(max_retries) => "failed (exhausted)".to_string(),
        status => status.to_string(),
    };
    let mut line = format!(
        "{}  {} {}  {}  retries {}/{}",
        op.id, op.entity, op.action, status, op.retry_count, max_retries
    );
    if let Some(user) = &op.user_id {
        line.push_str(&format!("  user {}", user));
    }
    if let Some(err) = &op.error {
        line.push_str(&format!("\n    {}", err));
    }
    line
}

pub fn format_station(station: &Station, favorite: bool) -> String {
    let marker = if favorite { "★" } else { " " };
    format!(
        "{} {:>3}  {}  [{}]  {}  {}",
        marker, station.id, station.name, station.city, station.kind, station.hours
    )
}

/// `2026-10-19 12:00  Ponto Carga Ipanema  30min  10.0kWh  R$ 19.50  completo`
pub fn format_session(session: &ChargingSession) -> String {
    let date = DateTime::parse_from_rfc3339(&session.date)
        .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| session.date.clone());
    format!(
        "{}  {}  {}min  {:.1}kWh  R$ {:.2}  {}",
        date, session.station_name, session.duration, session.energy, session.cost, session.status
    )
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
