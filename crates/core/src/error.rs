// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for spot-core operations.

use thiserror::Error;

/// All possible errors that can occur in spot-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("operation not found: {0}")]
    OperationNotFound(String),

    #[error("station not found: {0}")]
    StationNotFound(u32),

    #[error(
        "invalid entity: '{0}'\n  hint: valid entities are: favorites, chargingHistory, preferences"
    )]
    InvalidEntity(String),

    #[error("invalid action: '{0}'\n  hint: valid actions are: create, update, delete")]
    InvalidAction(String),

    #[error(
        "invalid sync status: '{0}'\n  hint: valid statuses are: pending, processing, failed, completed"
    )]
    InvalidSyncStatus(String),

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("storage is locked by another process: {0}")]
    StorageLocked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for spot-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
