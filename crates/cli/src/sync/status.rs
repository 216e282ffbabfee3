// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync status tracking.
//!
//! Shared, lock-free view of the in-flight flag and the last attempt and
//! success times. The in-flight flag is checked and set in one atomic step.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shared sync status handle. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SyncStatusTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug, Default)]
struct TrackerInner {
    syncing: AtomicBool,
    /// Milliseconds since the epoch, 0 if never.
    last_attempt_ms: AtomicI64,
    /// Milliseconds since the epoch, 0 if never.
    last_success_ms: AtomicI64,
}

/// Marks a batch in flight. Clears the flag when dropped.
#[derive(Debug)]
pub struct SyncGuard {
    inner: Arc<TrackerInner>,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.inner.syncing.store(false, Ordering::Release);
    }
}

fn to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    match ms {
        0 => None,
        ms => DateTime::from_timestamp_millis(ms),
    }
}

impl SyncStatusTracker {
    pub fn new() -> Self {
        SyncStatusTracker::default()
    }

    /// Claims the in-flight flag and stamps the attempt time.
    ///
    /// Returns `None` if a batch is already running.
    pub fn try_begin(&self) -> Option<SyncGuard> {
        self.inner
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.inner
            .last_attempt_ms
            .store(Utc::now().timestamp_millis(), Ordering::Release);
        Some(SyncGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Stamps the last successful sync time.
    pub fn mark_success(&self, at: DateTime<Utc>) {
        self.inner
            .last_success_ms
            .store(at.timestamp_millis(), Ordering::Release);
    }

    pub fn is_syncing(&self) -> bool {
        self.inner.syncing.load(Ordering::Acquire)
    }

    pub fn last_sync_attempt(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.inner.last_attempt_ms.load(Ordering::Acquire))
    }

    pub fn last_successful_sync(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.inner.last_success_ms.load(Ordering::Acquire))
    }

    /// Restores persisted timestamps, e.g. from a previous run.
    pub fn restore(&self, times: &SyncTimes) {
        if let Some(at) = times.last_sync_attempt {
            self.inner
                .last_attempt_ms
                .store(at.timestamp_millis(), Ordering::Release);
        }
        if let Some(at) = times.last_successful_sync {
            self.mark_success(at);
        }
    }

    /// Current timestamps, for persistence.
    pub fn times(&self) -> SyncTimes {
        SyncTimes {
            last_sync_attempt: self.last_sync_attempt(),
            last_successful_sync: self.last_successful_sync(),
        }
    }
}

/// Persisted part of the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncTimes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_attempt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_successful_sync: Option<DateTime<Utc>>,
}

/// What a status indicator needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_online: bool,
    pub is_syncing: bool,
    pub last_sync_attempt: Option<DateTime<Utc>>,
    pub last_successful_sync: Option<DateTime<Utc>>,
    pub pending_count: usize,
}
