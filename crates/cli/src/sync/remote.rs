// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote store abstraction.
//!
//! Provides a trait-based data layer that enables:
//! - A REST backend for production ([`RestRemote`](super::RestRemote))
//! - An in-memory store for tests and demos ([`MemoryRemote`](super::MemoryRemote))

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// Error type for remote store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("remote returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A row with the same key already exists.
    #[error("conflict on {table}: {key}")]
    Conflict { table: String, key: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The backend refused the call.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Invalid client configuration.
    #[error("remote misconfigured: {0}")]
    Config(String),
}

impl RemoteError {
    /// True for failures where no response arrived, which a retry may fix.
    pub fn is_transient(&self) -> bool {
        matches!(self, RemoteError::Request(_))
    }
}

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteStore`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// Remote tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Favorites,
    ChargingHistory,
    Preferences,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Favorites => "favorites",
            Table::ChargingHistory => "charging_history",
            Table::Preferences => "preferences",
        }
    }

    /// Columns that identify a row, used for upserts and conflicts.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Favorites => &["user_id", "station_id"],
            Table::ChargingHistory => &["id", "user_id"],
            Table::Preferences => &["user_id"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conjunction of column equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter that matches every row.
    pub fn all() -> Self {
        Filter::default()
    }

    /// Starts a filter with `column = value`.
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Filter::default().and_eq(column, value)
    }

    /// Adds `column = value`.
    pub fn and_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((column.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if `row` satisfies every condition.
    ///
    /// Values are compared in their textual form, so `5` matches `"5"` as it
    /// would in a query string.
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions.iter().all(|(column, expected)| {
            row.get(column)
                .is_some_and(|actual| value_text(actual) == value_text(expected))
        })
    }

    /// Query pairs in `column=eq.value` form.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{}", value_text(value))))
            .collect()
    }
}

/// Textual form of a JSON scalar: strings unquoted, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A backend holding the synchronized tables.
///
/// Implementations are shared between tasks, so every method takes `&self`.
pub trait RemoteStore: Send + Sync {
    /// Inserts a new row.
    fn insert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()>;

    /// Applies `patch` to every row matching `filter`.
    fn update(&self, table: Table, filter: Filter, patch: Value) -> RemoteFuture<'_, ()>;

    /// Inserts `row`, merging into an existing row with the same key.
    fn upsert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()>;

    /// Deletes every row matching `filter`.
    fn delete(&self, table: Table, filter: Filter) -> RemoteFuture<'_, ()>;

    /// Returns every row matching `filter`.
    fn select(&self, table: Table, filter: Filter) -> RemoteFuture<'_, Vec<Value>>;
}
