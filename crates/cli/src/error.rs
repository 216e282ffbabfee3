// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::RemoteError;

/// All possible errors that can occur in the electrospot library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not signed in\n  hint: run 'spot login <user>' or 'spot visitor' first")]
    NotSignedIn,

    #[error("visitor mode does not sync\n  hint: run 'spot login <user>' to sync changes")]
    VisitorMode,

    #[error("invalid user id: '{0}'\n  hint: use letters, digits, '-', '_', '.' or '@'")]
    InvalidUser(String),

    #[error("station not found: {0}\n  hint: run 'spot stations' to list known stations")]
    StationNotFound(u32),

    #[error("operation not found: {0}\n  hint: run 'spot queue list' to see queued operations")]
    OperationNotFound(String),

    #[error("invalid preference '{0}'\n  hint: use KEY=VALUE, e.g. theme=dark")]
    InvalidPreference(String),

    #[error("data directory is in use: {0}\n  hint: another spot process is running, e.g. 'spot sync watch'")]
    Locked(String),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("{0}")]
    Core(spot_core::Error),
}

/// A specialized Result type for electrospot operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<spot_core::Error> for Error {
    fn from(e: spot_core::Error) -> Self {
        match e {
            spot_core::Error::StationNotFound(id) => Error::StationNotFound(id),
            spot_core::Error::OperationNotFound(id) => Error::OperationNotFound(id),
            spot_core::Error::StorageLocked(path) => Error::Locked(path),
            spot_core::Error::Io(e) => Error::Io(e),
            spot_core::Error::Json(e) => Error::Json(e),
            spot_core::Error::CorruptedData(s) => Error::CorruptedData(s),
            other => Error::Core(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
