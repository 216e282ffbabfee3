// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued sync operations.
//!
//! Every user mutation that must reach the remote store is recorded as a
//! [`SyncOperation`]. Operations carry an opaque JSON payload whose shape
//! depends on the [`Entity`]; typed constructors on [`NewOperation`] build the
//! payloads the processor knows how to decode.
//!
//! The serialized form (camelCase fields, `chargingHistory` entity name) is the
//! same one the web client keeps in local storage, so queues can move between
//! the two.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::station::ChargingSession;

/// Logical category of synchronized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Entity {
    /// Favorite stations of a user.
    Favorites,
    /// Charging sessions recorded by a user.
    ChargingHistory,
    /// Per-user application preferences.
    Preferences,
}

impl Entity {
    /// All entities, in dispatch order.
    pub const ALL: [Entity; 3] = [Entity::Favorites, Entity::ChargingHistory, Entity::Preferences];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Favorites => "favorites",
            Entity::ChargingHistory => "chargingHistory",
            Entity::Preferences => "preferences",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Entity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "favorites" => Ok(Entity::Favorites),
            "charginghistory" | "charging_history" | "charging-history" => {
                Ok(Entity::ChargingHistory)
            }
            "preferences" => Ok(Entity::Preferences),
            _ => Err(Error::InvalidEntity(s.to_string())),
        }
    }
}

/// Kind of mutation recorded by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// Replay state of a queued operation.
///
/// ```text
/// pending ──► processing ──► completed
///                 │
///                 ▼
///              failed ──► processing ──► ... (bounded retries)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Waiting for the next batch.
    Pending,
    /// Being replayed by the current batch.
    Processing,
    /// Last replay attempt failed.
    Failed,
    /// Replayed successfully; purged at the next cleanup.
    Completed,
}

impl SyncStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "pending",
            SyncStatus::Processing => "processing",
            SyncStatus::Failed => "failed",
            SyncStatus::Completed => "completed",
        }
    }

    /// Returns true if the operation still has to reach the remote store.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, SyncStatus::Pending | SyncStatus::Failed)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SyncStatus::Pending),
            "processing" => Ok(SyncStatus::Processing),
            "failed" => Ok(SyncStatus::Failed),
            "completed" => Ok(SyncStatus::Completed),
            _ => Err(Error::InvalidSyncStatus(s.to_string())),
        }
    }
}

/// A mutation recorded locally and awaiting replay against the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOperation {
    /// Unique id within the queue, generated at enqueue time.
    pub id: String,
    pub entity: Entity,
    pub action: Action,
    /// Entity-specific payload.
    pub data: serde_json::Value,
    /// Enqueue time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub retry_count: u32,
    pub sync_status: SyncStatus,
    /// Message of the last failed attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOperation {
    /// Creates a pending record from a partial operation.
    pub fn from_new(id: String, timestamp: i64, new: NewOperation) -> Self {
        SyncOperation {
            id,
            entity: new.entity,
            action: new.action,
            data: new.data,
            timestamp,
            user_id: new.user_id,
            retry_count: 0,
            sync_status: SyncStatus::Pending,
            error: None,
        }
    }

    /// Decodes the payload into the given type.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Returns true if the operation can be replayed for `user_id`.
    ///
    /// Operations without an owner are replayed for whoever is connected.
    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id.as_deref().is_none_or(|owner| owner == user_id)
    }

    /// Returns true if the operation failed `max_retries` times or more.
    pub fn is_exhausted(&self, max_retries: u32) -> bool {
        self.sync_status == SyncStatus::Failed && self.retry_count >= max_retries
    }

    /// Returns true if the next batch should replay this operation.
    pub fn is_retryable(&self, max_retries: u32) -> bool {
        match self.sync_status {
            SyncStatus::Pending => true,
            SyncStatus::Failed => self.retry_count < max_retries,
            SyncStatus::Processing | SyncStatus::Completed => false,
        }
    }
}

/// The caller-supplied part of an operation: everything except id,
/// timestamp, retry count and status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperation {
    pub entity: Entity,
    pub action: Action,
    pub data: serde_json::Value,
    pub user_id: Option<String>,
}

/// Payload of a favorites operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePayload {
    pub station_id: u32,
}

impl NewOperation {
    /// Creates a partial operation with a raw payload.
    pub fn new(
        entity: Entity,
        action: Action,
        data: serde_json::Value,
        user_id: Option<String>,
    ) -> Self {
        NewOperation {
            entity,
            action,
            data,
            user_id,
        }
    }

    /// Favorite a station (`create`) or drop a favorite (`delete`).
    pub fn favorite(action: Action, station_id: u32, user_id: impl Into<String>) -> Self {
        NewOperation::new(
            Entity::Favorites,
            action,
            serde_json::json!({ "stationId": station_id }),
            Some(user_id.into()),
        )
    }

    /// Record, amend or drop a charging session.
    pub fn charging_session(
        action: Action,
        session: &ChargingSession,
        user_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(NewOperation::new(
            Entity::ChargingHistory,
            action,
            serde_json::to_value(session)?,
            Some(user_id.into()),
        ))
    }

    /// Write the preferences document of a user.
    pub fn preferences(
        action: Action,
        preferences: serde_json::Value,
        user_id: impl Into<String>,
    ) -> Self {
        NewOperation::new(
            Entity::Preferences,
            action,
            preferences,
            Some(user_id.into()),
        )
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
