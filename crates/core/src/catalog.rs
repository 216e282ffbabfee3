// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in station catalog for the supported region (Rio de Janeiro state).

use crate::error::{Error, Result};
use crate::station::Station;

/// Cities covered by the catalog.
pub const CITIES: [&str; 6] = [
    "Rio de Janeiro",
    "Niterói",
    "Petrópolis",
    "Búzios",
    "Paraty",
    "Angra dos Reis",
];

// (id, name, city, lat, lng, type, hours)
#[rustfmt::skip]
const STATIONS: [(u32, &str, &str, f64, f64, &str, &str); 12] = [
    (1, "Centro Carregamento Copacabana", "Rio de Janeiro", -22.9671, -43.1789, "Rápido (150kW)", "24h"),
    (2, "Eletroposto Barra Shopping", "Rio de Janeiro", -22.9976, -43.3629, "Rápido (50kW)", "10h - 22h"),
    (3, "Ponto Carga Ipanema", "Rio de Janeiro", -22.9848, -43.1984, "Semi-rápido (22kW)", "8h - 20h"),
    (4, "Estação Shopping Niterói", "Niterói", -22.8891, -43.1154, "Rápido (100kW)", "10h - 22h"),
    (5, "Posto Icaraí", "Niterói", -22.9077, -43.1022, "Semi-rápido (22kW)", "7h - 23h"),
    (6, "Carregador Petrópolis Centro", "Petrópolis", -22.5112, -43.1779, "Rápido (50kW)", "8h - 20h"),
    (7, "Estação Búzios Central", "Búzios", -22.7469, -41.8815, "Semi-rápido (11kW)", "24h"),
    (8, "Ponto Paraty Histórica", "Paraty", -23.2178, -44.7136, "Lento (7kW)", "9h - 18h"),
    (9, "Porto Angra Carregadores", "Angra dos Reis", -23.0069, -44.3183, "Rápido (50kW)", "8h - 22h"),
    (10, "Centro de Carregamento Norte Shopping", "Rio de Janeiro", -22.8897, -43.2774, "Rápido (100kW)", "10h - 22h"),
    (11, "Estação Tijuca", "Rio de Janeiro", -22.9272, -43.2377, "Semi-rápido (22kW)", "8h - 20h"),
    (12, "Ponto Botafogo", "Rio de Janeiro", -22.9511, -43.1811, "Rápido (50kW)", "24h"),
];

/// Returns every station in the catalog, ordered by id.
pub fn stations() -> Vec<Station> {
    STATIONS
        .iter()
        .map(|&(id, name, city, lat, lng, kind, hours)| Station {
            id,
            name: name.to_string(),
            city: city.to_string(),
            lat,
            lng,
            kind: kind.to_string(),
            hours: hours.to_string(),
            distance: None,
            availability: None,
            connector_types: None,
        })
        .collect()
}

/// Looks up a station by id.
pub fn find(id: u32) -> Result<Station> {
    stations()
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(Error::StationNotFound(id))
}

/// Returns the stations located in `city` (case-insensitive).
pub fn in_city(city: &str) -> Vec<Station> {
    let city = city.to_lowercase();
    stations()
        .into_iter()
        .filter(|s| s.city.to_lowercase() == city)
        .collect()
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
