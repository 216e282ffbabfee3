// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use serde_json::json;

use super::{print_json, App};
use crate::colors;
use crate::display::format_status;
use crate::error::Result;
use crate::session::Session;

/// Prints the sync indicator, queue size and sync times.
pub async fn run(app: &App) -> Result<()> {
    app.connect().await;
    let snapshot = app.service.status().await;

    if app.global.json {
        return print_json(&snapshot);
    }
    for line in format_status(&snapshot, Utc::now(), colors::should_colorize()) {
        println!("{}", line);
    }
    match &app.session {
        Some(Session::User { user_id }) => println!("user: {}", user_id),
        Some(Session::Visitor) => println!("user: visitor"),
        None => println!("user: signed out"),
    }
    Ok(())
}

/// Runs the connectivity probe and stores its answer.
pub async fn probe(app: &App) -> Result<()> {
    let online = app.connect().await;
    if app.global.json {
        return print_json(&json!({ "online": online }));
    }
    println!("{}", if online { "online" } else { "offline" });
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
