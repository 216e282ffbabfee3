// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use spot_core::{catalog, Station};

use super::{print_json, App};
use crate::display::format_station;
use crate::error::Result;
use crate::features::Favorites;

#[derive(Serialize)]
struct StationView<'a> {
    #[serde(flatten)]
    station: &'a Station,
    favorite: bool,
}

/// Lists the catalog, marking favorites when someone is signed in.
pub async fn run(app: &App, city: Option<&str>) -> Result<()> {
    let stations = match city {
        Some(city) => catalog::in_city(city),
        None => catalog::stations(),
    };

    let favorites: Vec<u32> = match app.hooks() {
        Ok(ctx) => Favorites::load(ctx)
            .await?
            .items()
            .iter()
            .map(|s| s.id)
            .collect(),
        Err(_) => Vec::new(),
    };

    if app.global.json {
        let views: Vec<StationView<'_>> = stations
            .iter()
            .map(|station| StationView {
                station,
                favorite: favorites.contains(&station.id),
            })
            .collect();
        return print_json(&views);
    }

    if stations.is_empty() {
        println!("No stations found");
        println!("Cities: {}", catalog::CITIES.join(", "));
        return Ok(());
    }
    for station in &stations {
        println!("{}", format_station(station, favorites.contains(&station.id)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "stations_tests.rs"]
mod tests;
