// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory remote store.
//!
//! Selected with the `memory:` remote URL. Rows live for the lifetime of the
//! process, which makes it suitable for demos and tests. Failures can be
//! injected to exercise retry paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::remote::{value_text, Filter, RemoteError, RemoteFuture, RemoteStore, Table};

/// Remote store backed by in-process tables.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    /// Number of upcoming calls that fail.
    fail_next: AtomicUsize,
    /// Every call fails while set.
    failing: AtomicBool,
    /// Total calls received, failed ones included.
    calls: AtomicUsize,
}

impl MemoryRemote {
    pub fn new() -> Self {
        MemoryRemote::default()
    }

    /// Makes the next `count` calls fail with [`RemoteError::Rejected`].
    pub fn fail_next(&self, count: usize) {
        self.inner.fail_next.store(count, Ordering::SeqCst);
    }

    /// Makes every call fail until cleared.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of a table.
    pub async fn rows(&self, table: Table) -> Vec<Value> {
        let tables = self.inner.tables.lock().await;
        tables.get(&table).cloned().unwrap_or_default()
    }

    fn check_failure(&self) -> Result<(), RemoteError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected("remote unavailable".to_string()));
        }
        let consumed = self
            .inner
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if consumed.is_ok() {
            return Err(RemoteError::Rejected("injected failure".to_string()));
        }
        Ok(())
    }
}

/// Filter on the key columns of `table`, taken from `row`.
fn key_filter(table: Table, row: &Value) -> Result<Filter, RemoteError> {
    let mut filter = Filter::all();
    for column in table.key_columns() {
        let value = row.get(*column).ok_or_else(|| {
            RemoteError::Rejected(format!("{} row is missing '{}'", table, column))
        })?;
        filter = filter.and_eq(column, value.clone());
    }
    Ok(filter)
}

fn key_text(filter: &Filter) -> String {
    filter
        .conditions()
        .iter()
        .map(|(column, value)| format!("{}={}", column, value_text(value)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Shallow-merges the object `patch` into `row`.
fn merge(row: &mut Value, patch: &Value) {
    if let (Some(target), Some(source)) = (row.as_object_mut(), patch.as_object()) {
        for (k, v) in source {
            target.insert(k.clone(), v.clone());
        }
    }
}

/// Appends `row`, failing on a duplicate key.
pub(super) fn insert_row(
    rows: &mut Vec<Value>,
    table: Table,
    row: Value,
) -> Result<(), RemoteError> {
    let key = key_filter(table, &row)?;
    if rows.iter().any(|r| key.matches(r)) {
        return Err(RemoteError::Conflict {
            table: table.to_string(),
            key: key_text(&key),
        });
    }
    rows.push(row);
    Ok(())
}

pub(super) fn update_rows(rows: &mut [Value], filter: &Filter, patch: &Value) {
    for row in rows.iter_mut().filter(|r| filter.matches(r)) {
        merge(row, patch);
    }
}

/// Merges `row` into the row with the same key, or appends it.
pub(super) fn upsert_row(
    rows: &mut Vec<Value>,
    table: Table,
    row: Value,
) -> Result<(), RemoteError> {
    let key = key_filter(table, &row)?;
    match rows.iter_mut().find(|r| key.matches(r)) {
        Some(existing) => merge(existing, &row),
        None => rows.push(row),
    }
    Ok(())
}

pub(super) fn delete_rows(rows: &mut Vec<Value>, filter: &Filter) {
    rows.retain(|r| !filter.matches(r));
}

pub(super) fn select_rows(rows: &[Value], filter: &Filter) -> Vec<Value> {
    rows.iter().filter(|r| filter.matches(r)).cloned().collect()
}

impl RemoteStore for MemoryRemote {
    fn insert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.check_failure()?;
            let mut tables = self.inner.tables.lock().await;
            insert_row(tables.entry(table).or_default(), table, row)
        })
    }

    fn update(&self, table: Table, filter: Filter, patch: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.check_failure()?;
            let mut tables = self.inner.tables.lock().await;
            if let Some(rows) = tables.get_mut(&table) {
                update_rows(rows, &filter, &patch);
            }
            Ok(())
        })
    }

    fn upsert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.check_failure()?;
            let mut tables = self.inner.tables.lock().await;
            upsert_row(tables.entry(table).or_default(), table, row)
        })
    }

    fn delete(&self, table: Table, filter: Filter) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.check_failure()?;
            let mut tables = self.inner.tables.lock().await;
            if let Some(rows) = tables.get_mut(&table) {
                delete_rows(rows, &filter);
            }
            Ok(())
        })
    }

    fn select(&self, table: Table, filter: Filter) -> RemoteFuture<'_, Vec<Value>> {
        Box::pin(async move {
            self.check_failure()?;
            let tables = self.inner.tables.lock().await;
            Ok(tables
                .get(&table)
                .map(|rows| select_rows(rows, &filter))
                .unwrap_or_default())
        })
    }
}
