// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronization commands.

use std::time::Duration;

use super::{print_json, App};
use crate::error::Result;
use crate::sync::BatchResult;

/// Longest wait between connectivity checks while watching.
const MAX_PROBE_PERIOD: Duration = Duration::from_secs(30);

fn report(app: &App, result: &BatchResult) -> Result<()> {
    if app.global.json {
        return print_json(result);
    }
    match result.skipped {
        Some(reason) => println!("Sync skipped: {}", reason.as_str()),
        None => println!(
            "Synced {} operation(s), {} failed",
            result.processed_count, result.error_count
        ),
    }
    Ok(())
}

/// Runs one batch for the signed-in user.
pub async fn run(app: &App) -> Result<()> {
    let user_id = app.user_id()?;
    app.connect().await;
    let result = app.service.sync_now(user_id).await?;
    report(app, &result)
}

/// Makes exhausted operations eligible again, then runs a batch.
pub async fn retry(app: &App) -> Result<()> {
    let user_id = app.user_id()?;
    let reset = app.service.retry_failed().await?;
    if !app.global.json {
        println!("Reset {} operation(s)", reset);
    }
    app.connect().await;
    let result = app.service.sync_now(user_id).await?;
    report(app, &result)
}

/// Syncs every `every` seconds (or the configured interval) and whenever
/// the network comes back, until Ctrl-C.
pub async fn watch(app: &mut App, every: Option<u64>) -> Result<()> {
    let user_id = app.user_id()?.to_string();
    let interval = every
        .map(Duration::from_secs)
        .unwrap_or(app.service.settings().interval);

    app.connect().await;
    app.service.start_auto_sync(&user_id, interval);
    println!(
        "Syncing every {}s and on reconnect (Ctrl-C to stop)",
        interval.as_secs()
    );

    let monitor = app.service.monitor().clone();
    let offline = app.global.offline;
    let probe_period = interval.min(MAX_PROBE_PERIOD);
    let watch_network = async move {
        let mut ticker = tokio::time::interval(probe_period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !offline {
                monitor.refresh().await;
            }
        }
    };

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => signal,
        _ = watch_network => Ok(()),
    };
    app.service.shutdown();
    outcome?;
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
