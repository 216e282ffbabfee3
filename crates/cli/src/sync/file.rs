// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed remote store.
//!
//! Selected with a `file:<dir>` remote URL. Each table is one JSON document
//! in `<dir>`, so rows outlive the process. Useful for demos without a
//! backend.

use serde_json::Value;
use spot_core::LocalStorage;
use tokio::sync::Mutex;

use super::memory::{delete_rows, insert_row, select_rows, update_rows, upsert_row};
use super::remote::{Filter, RemoteError, RemoteFuture, RemoteResult, RemoteStore, Table};

/// Remote store keeping tables as JSON files.
#[derive(Debug)]
pub struct FileRemote {
    storage: LocalStorage,
    /// Serializes read-modify-write cycles.
    write: Mutex<()>,
}

fn storage_error(e: spot_core::Error) -> RemoteError {
    RemoteError::Request(format!("file remote: {}", e))
}

impl FileRemote {
    pub fn open(dir: &std::path::Path) -> RemoteResult<Self> {
        let storage = LocalStorage::open(dir).map_err(storage_error)?;
        Ok(FileRemote {
            storage,
            write: Mutex::new(()),
        })
    }

    /// Rows of `table`, empty if the table was never written.
    pub fn rows(&self, table: Table) -> RemoteResult<Vec<Value>> {
        Ok(self
            .storage
            .get::<Vec<Value>>(table.as_str())
            .map_err(storage_error)?
            .unwrap_or_default())
    }

    async fn modify<F>(&self, table: Table, f: F) -> RemoteResult<()>
    where
        F: FnOnce(&mut Vec<Value>) -> RemoteResult<()>,
    {
        let _write = self.write.lock().await;
        let mut rows = self.rows(table)?;
        f(&mut rows)?;
        self.storage
            .set(table.as_str(), &rows)
            .map_err(storage_error)
    }
}

impl RemoteStore for FileRemote {
    fn insert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(self.modify(table, move |rows| insert_row(rows, table, row)))
    }

    fn update(&self, table: Table, filter: Filter, patch: Value) -> RemoteFuture<'_, ()> {
        Box::pin(self.modify(table, move |rows| {
            update_rows(rows, &filter, &patch);
            Ok(())
        }))
    }

    fn upsert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(self.modify(table, move |rows| upsert_row(rows, table, row)))
    }

    fn delete(&self, table: Table, filter: Filter) -> RemoteFuture<'_, ()> {
        Box::pin(self.modify(table, move |rows| {
            delete_rows(rows, &filter);
            Ok(())
        }))
    }

    fn select(&self, table: Table, filter: Filter) -> RemoteFuture<'_, Vec<Value>> {
        Box::pin(async move {
            let rows = self.rows(table)?;
            Ok(select_rows(&rows, &filter))
        })
    }
}
