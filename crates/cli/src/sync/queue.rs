// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent sync queue.
//!
//! The whole queue is one JSON array stored under [`QUEUE_KEY`]. Every
//! mutation writes it back immediately, so the queue survives restarts. On
//! open, records left `processing` by an interrupted batch go back to
//! `pending`.

use chrono::Utc;
use spot_core::id::generate_unique_operation_id;
use spot_core::{Entity, Error, LocalStorage, NewOperation, Result, SyncOperation, SyncStatus};

/// Storage key of the persisted queue.
pub const QUEUE_KEY: &str = "electrospot-sync-queue";

/// Ordered list of queued operations, mirrored to local storage.
#[derive(Debug)]
pub struct SyncQueue {
    storage: LocalStorage,
    operations: Vec<SyncOperation>,
}

impl SyncQueue {
    /// Loads the queue from `storage`, recovering interrupted records.
    pub fn open(storage: LocalStorage) -> Result<Self> {
        let operations: Vec<SyncOperation> = storage.get(QUEUE_KEY)?.unwrap_or_default();
        let mut queue = SyncQueue {
            storage,
            operations,
        };

        let mut recovered = 0;
        for op in queue
            .operations
            .iter_mut()
            .filter(|op| op.sync_status == SyncStatus::Processing)
        {
            op.sync_status = SyncStatus::Pending;
            recovered += 1;
        }
        if recovered > 0 {
            tracing::info!(recovered, "reverted interrupted operations to pending");
            queue.persist()?;
        }

        tracing::debug!(len = queue.operations.len(), "sync queue loaded");
        Ok(queue)
    }

    /// Appends a new pending operation stamped with the current time.
    pub fn add_operation(&mut self, new: NewOperation) -> Result<SyncOperation> {
        self.add_operation_at(new, Utc::now().timestamp_millis())
    }

    /// Appends a new pending operation stamped with `timestamp` (ms).
    pub fn add_operation_at(&mut self, new: NewOperation, timestamp: i64) -> Result<SyncOperation> {
        let salt = self.operations.len() as u64;
        let id = generate_unique_operation_id(timestamp, &new, salt, |id| {
            self.operations.iter().any(|op| op.id == id)
        });

        let op = SyncOperation::from_new(id, timestamp, new);
        tracing::debug!(id = %op.id, entity = %op.entity, action = %op.action, "enqueued operation");
        self.operations.push(op.clone());
        self.persist()?;
        Ok(op)
    }

    /// Moves a record to `status`. The retry count grows only on failure.
    pub fn update_operation_status(
        &mut self,
        id: &str,
        status: SyncStatus,
        error: Option<String>,
    ) -> Result<SyncOperation> {
        let op = self
            .operations
            .iter_mut()
            .find(|op| op.id == id)
            .ok_or_else(|| Error::OperationNotFound(id.to_string()))?;

        op.sync_status = status;
        if status == SyncStatus::Failed {
            op.retry_count += 1;
        }
        op.error = error;
        let updated = op.clone();

        self.persist()?;
        Ok(updated)
    }

    /// Deletes a record. Returns false if no record had that id.
    pub fn remove_operation(&mut self, id: &str) -> Result<bool> {
        let before = self.operations.len();
        self.operations.retain(|op| op.id != id);
        if self.operations.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Pending and failed records, in enqueue order.
    pub fn get_pending_operations(&self, entity: Option<Entity>) -> Vec<SyncOperation> {
        self.operations
            .iter()
            .filter(|op| op.sync_status.is_outstanding())
            .filter(|op| entity.is_none_or(|e| op.entity == e))
            .cloned()
            .collect()
    }

    /// Drops every completed record. Returns how many were removed.
    pub fn clear_completed_operations(&mut self) -> Result<usize> {
        let before = self.operations.len();
        self.operations
            .retain(|op| op.sync_status != SyncStatus::Completed);
        let removed = before - self.operations.len();
        if removed > 0 {
            tracing::debug!(removed, "purged completed operations");
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn operations(&self) -> &[SyncOperation] {
        &self.operations
    }

    pub fn get(&self, id: &str) -> Option<&SyncOperation> {
        self.operations.iter().find(|op| op.id == id)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of records still waiting to reach the remote store.
    pub fn pending_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.sync_status.is_outstanding())
            .count()
    }

    /// Records the next batch replays: pending, or failed under `max_retries`.
    pub fn retryable_operations(&self, max_retries: u32) -> Vec<SyncOperation> {
        self.operations
            .iter()
            .filter(|op| op.is_retryable(max_retries))
            .cloned()
            .collect()
    }

    /// Failed records that used up their retries.
    pub fn exhausted_operations(&self, max_retries: u32) -> Vec<SyncOperation> {
        self.operations
            .iter()
            .filter(|op| op.is_exhausted(max_retries))
            .cloned()
            .collect()
    }

    /// Manual retry: exhausted records go back to pending with no retries used.
    pub fn reset_exhausted(&mut self, max_retries: u32) -> Result<usize> {
        let mut reset = 0;
        for op in self
            .operations
            .iter_mut()
            .filter(|op| op.is_exhausted(max_retries))
        {
            op.sync_status = SyncStatus::Pending;
            op.retry_count = 0;
            op.error = None;
            reset += 1;
        }
        if reset > 0 {
            tracing::info!(reset, "exhausted operations reset for retry");
            self.persist()?;
        }
        Ok(reset)
    }

    /// Drops every record.
    pub fn clear(&mut self) -> Result<()> {
        self.operations.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.storage.set(QUEUE_KEY, &self.operations)
    }
}
