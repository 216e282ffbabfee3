// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Who is using the device.
//!
//! Persisted under the `session` key. No document means signed out.

use serde::{Deserialize, Serialize};
use spot_core::LocalStorage;

use crate::error::{Error, Result};

pub const SESSION_KEY: &str = "session";

const MAX_USER_LEN: usize = 64;

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Session {
    /// An account whose changes are queued and synced.
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    /// Demo mode: changes stay on the device and are never queued.
    Visitor,
}

impl Session {
    /// Creates a user session after validating the id.
    pub fn user(user_id: &str) -> Result<Self> {
        validate_user(user_id)?;
        Ok(Session::User {
            user_id: user_id.to_string(),
        })
    }

    pub fn load(storage: &LocalStorage) -> Result<Option<Self>> {
        Ok(storage.get(SESSION_KEY)?)
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<()> {
        Ok(storage.set(SESSION_KEY, self)?)
    }

    pub fn clear(storage: &LocalStorage) -> Result<()> {
        Ok(storage.remove(SESSION_KEY)?)
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Session::User { user_id } => Some(user_id),
            Session::Visitor => None,
        }
    }

    pub fn is_visitor(&self) -> bool {
        matches!(self, Session::Visitor)
    }
}

/// Validates a user id: 1 to 64 characters of ASCII letters, digits, `-`,
/// `_`, `.` or `@`.
pub fn validate_user(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && user_id.len() <= MAX_USER_LEN
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidUser(user_id.to_string()))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
