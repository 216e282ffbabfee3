// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::{Map, Value};

use super::{print_json, App};
use crate::error::Result;
use crate::features::{parse_assignment, Preferences};

pub async fn show(app: &App) -> Result<()> {
    let prefs = Preferences::load(app.hooks()?)?;

    if app.global.json {
        return print_json(prefs.values());
    }
    if prefs.values().is_empty() {
        println!("No preferences saved");
        return Ok(());
    }
    for (key, value) in prefs.values() {
        match value {
            Value::String(s) => println!("{} = {}", key, s),
            other => println!("{} = {}", key, other),
        }
    }
    Ok(())
}

/// Saves `KEY=VALUE` pairs. Every pair is validated before anything is
/// written.
pub async fn set(app: &App, assignments: &[String]) -> Result<()> {
    let updates = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<Map<String, Value>>>()?;
    let ctx = app.hooks()?;
    app.connect().await;

    let mut prefs = Preferences::load(ctx)?;
    prefs.set(updates).await?;
    if app.global.json {
        print_json(prefs.values())?;
    }
    Ok(())
}

pub async fn reset(app: &App) -> Result<()> {
    let ctx = app.hooks()?;
    app.connect().await;

    let mut prefs = Preferences::load(ctx)?;
    prefs.reset().await?;
    Ok(())
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
