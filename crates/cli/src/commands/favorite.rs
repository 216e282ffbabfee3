// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Favorite station commands.
//!
//! Outcomes are reported through toasts on stderr; `--json` prints the
//! resulting list on stdout.

use serde_json::json;
use spot_core::catalog;

use super::{print_json, App};
use crate::display::format_station;
use crate::error::Result;
use crate::features::Favorites;

pub async fn add(app: &App, id: u32) -> Result<()> {
    let station = catalog::find(id)?;
    let ctx = app.hooks()?;
    app.connect().await;

    let mut favorites = Favorites::load(ctx).await?;
    if favorites.add_favorite(&station).await?.is_none() {
        println!("{} is already a favorite", station.name);
    }
    if app.global.json {
        print_json(favorites.items())?;
    }
    Ok(())
}

pub async fn remove(app: &App, id: u32) -> Result<()> {
    let station = catalog::find(id)?;
    let ctx = app.hooks()?;
    app.connect().await;

    let mut favorites = Favorites::load(ctx).await?;
    if favorites.remove_favorite(&station).await?.is_none() {
        println!("{} is not a favorite", station.name);
    }
    if app.global.json {
        print_json(favorites.items())?;
    }
    Ok(())
}

pub async fn toggle(app: &App, id: u32) -> Result<()> {
    let station = catalog::find(id)?;
    let ctx = app.hooks()?;
    app.connect().await;

    let mut favorites = Favorites::load(ctx).await?;
    let favorite = favorites.toggle_favorite(&station).await?;
    if app.global.json {
        print_json(&json!({ "stationId": station.id, "favorite": favorite }))?;
    }
    Ok(())
}

pub async fn list(app: &App) -> Result<()> {
    let favorites = Favorites::load(app.hooks()?).await?;

    if app.global.json {
        return print_json(favorites.items());
    }
    if favorites.items().is_empty() {
        println!("No favorites yet");
        return Ok(());
    }
    for station in favorites.items() {
        println!("{}", format_station(station, true));
    }
    Ok(())
}

#[cfg(test)]
#[path = "favorite_tests.rs"]
mod tests;
