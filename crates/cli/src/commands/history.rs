// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use spot_core::catalog;

use super::{print_json, App};
use crate::display::format_session;
use crate::error::Result;
use crate::features::ChargingHistory;

/// Simulates a charging session at station `id`.
pub async fn simulate(app: &App, id: u32) -> Result<()> {
    let station = catalog::find(id)?;
    let ctx = app.hooks()?;
    app.connect().await;

    let mut history = ChargingHistory::load(ctx).await?;
    let session = history.simulate_charging(&station).await?;

    if app.global.json {
        return print_json(&session);
    }
    println!("{}", format_session(&session));
    Ok(())
}

/// Lists the `limit` newest sessions.
pub async fn list(app: &App, limit: usize) -> Result<()> {
    let history = ChargingHistory::load(app.hooks()?).await?;
    let sessions = history.recent_sessions(limit);

    if app.global.json {
        return print_json(sessions);
    }
    if sessions.is_empty() {
        println!("No charging sessions yet");
        return Ok(());
    }
    for session in sessions {
        println!("{}", format_session(session));
    }
    Ok(())
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
