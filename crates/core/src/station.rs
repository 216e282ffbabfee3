// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Station and charging-session records.
//!
//! These are display data: the only invariant is id uniqueness, enforced by
//! the collections that hold them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Real-time availability reported for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "disponível")]
    Available,
    #[serde(rename = "ocupado")]
    Busy,
    #[serde(rename = "offline")]
    Offline,
}

/// A charging station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    /// Charger class and power, e.g. "Rápido (50kW)".
    #[serde(rename = "type")]
    pub kind: String,
    /// Opening hours, e.g. "24h" or "10h - 22h".
    pub hours: String,
    /// Distance from the user in km, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_types: Option<Vec<String>>,
}

/// Outcome of a charging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingStatus {
    #[serde(rename = "completo")]
    Complete,
    #[serde(rename = "interrompido")]
    Interrupted,
    #[serde(rename = "em andamento")]
    InProgress,
}

impl ChargingStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingStatus::Complete => "completo",
            ChargingStatus::Interrupted => "interrompido",
            ChargingStatus::InProgress => "em andamento",
        }
    }
}

impl fmt::Display for ChargingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChargingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "completo" => Ok(ChargingStatus::Complete),
            "interrompido" => Ok(ChargingStatus::Interrupted),
            "em andamento" => Ok(ChargingStatus::InProgress),
            _ => Err(Error::CorruptedData(format!(
                "unknown charging status '{}'",
                s
            ))),
        }
    }
}

/// A charging session at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSession {
    pub id: i64,
    pub station_id: u32,
    pub station_name: String,
    /// Start of the session, RFC 3339.
    pub date: String,
    /// Minutes.
    pub duration: u32,
    /// kWh.
    pub energy: f64,
    /// BRL.
    pub cost: f64,
    pub status: ChargingStatus,
}

/// A favorited station as held in the remote `favorites` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    pub station_id: u32,
}

#[cfg(test)]
#[path = "station_tests.rs"]
mod tests;
