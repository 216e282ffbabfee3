// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync service context.
//!
//! Owns the queue, network monitor, status tracker, remote store and
//! notifier for the lifetime of a session. Construct it once at start-up with
//! [`SyncService::open`] and dispose of it with [`SyncService::shutdown`]
//! (dropping it does the same).
//!
//! Only one process may hold the service for a data directory at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::AbortHandle;
use spot_core::{LocalStorage, NewOperation, Result, StorageLock, SyncOperation};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::monitor::{NetworkMonitor, Probe};
use super::processor::{BatchResult, SkipReason, SyncProcessor};
use super::queue::SyncQueue;
use super::remote::RemoteStore;
use super::request::abortable;
use super::status::{StatusSnapshot, SyncStatusTracker, SyncTimes};
use crate::notify::Notifier;

/// Storage key of the persisted sync timestamps.
pub const STATUS_KEY: &str = "sync-status";

/// Name of the lock file guarding a data directory.
pub const LOCK_NAME: &str = "spot";

/// Tunables of the sync service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Failed attempts after which an operation stops being retried.
    pub max_retries: u32,
    /// Period of the auto-sync task.
    pub interval: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            max_retries: 3,
            interval: Duration::from_secs(5 * 60),
        }
    }
}

/// State shared with the auto-sync task.
#[derive(Clone)]
struct SyncContext {
    storage: LocalStorage,
    queue: Arc<Mutex<SyncQueue>>,
    monitor: NetworkMonitor,
    tracker: SyncStatusTracker,
    processor: SyncProcessor,
}

impl SyncContext {
    async fn sync_now(&self, user_id: &str) -> Result<BatchResult> {
        let Some(_guard) = self.tracker.try_begin() else {
            tracing::debug!("sync already in flight, skipping");
            return Ok(BatchResult::skipped(SkipReason::AlreadySyncing));
        };

        let outcome = self
            .processor
            .process_queue_with_connected_user(user_id)
            .await;
        if let Ok(result) = &outcome {
            if result.is_clean() {
                self.tracker.mark_success(Utc::now());
            }
        }
        self.storage.set(STATUS_KEY, &self.tracker.times())?;
        outcome
    }
}

struct AutoSync {
    abort: AbortHandle,
    task: JoinHandle<()>,
}

/// Offline-first sync context for one data directory.
pub struct SyncService {
    ctx: SyncContext,
    remote: Arc<dyn RemoteStore>,
    notifier: Arc<dyn Notifier>,
    settings: SyncSettings,
    auto_sync: Option<AutoSync>,
    _lock: StorageLock,
}

impl SyncService {
    /// Opens the service over `storage`.
    ///
    /// `online` seeds the cached connectivity flag. Fails with
    /// [`spot_core::Error::StorageLocked`] if another process holds the data
    /// directory.
    pub fn open(
        settings: SyncSettings,
        storage: LocalStorage,
        remote: Arc<dyn RemoteStore>,
        probe: Arc<dyn Probe>,
        notifier: Arc<dyn Notifier>,
        online: bool,
    ) -> Result<Self> {
        let lock = storage.try_lock(LOCK_NAME)?;
        let queue = Arc::new(Mutex::new(SyncQueue::open(storage.clone())?));
        let monitor = NetworkMonitor::new(probe, online);

        let tracker = SyncStatusTracker::new();
        if let Some(times) = storage.get::<SyncTimes>(STATUS_KEY)? {
            tracker.restore(&times);
        }

        let processor = SyncProcessor::new(
            Arc::clone(&queue),
            monitor.clone(),
            Arc::clone(&remote),
            Arc::clone(&notifier),
            settings.max_retries,
        );

        Ok(SyncService {
            ctx: SyncContext {
                storage,
                queue,
                monitor,
                tracker,
                processor,
            },
            remote,
            notifier,
            settings,
            auto_sync: None,
            _lock: lock,
        })
    }

    pub fn settings(&self) -> SyncSettings {
        self.settings
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.ctx.storage
    }

    pub fn queue(&self) -> Arc<Mutex<SyncQueue>> {
        Arc::clone(&self.ctx.queue)
    }

    pub fn monitor(&self) -> &NetworkMonitor {
        &self.ctx.monitor
    }

    pub fn tracker(&self) -> &SyncStatusTracker {
        &self.ctx.tracker
    }

    pub fn remote(&self) -> Arc<dyn RemoteStore> {
        Arc::clone(&self.remote)
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Appends an operation to the queue.
    pub async fn enqueue(&self, new: NewOperation) -> Result<SyncOperation> {
        self.ctx.queue.lock().await.add_operation(new)
    }

    /// Runs one guarded batch for `user_id`.
    ///
    /// Returns a result skipped with [`SkipReason::AlreadySyncing`] if a batch
    /// is already running.
    pub async fn sync_now(&self, user_id: &str) -> Result<BatchResult> {
        self.ctx.sync_now(user_id).await
    }

    /// Makes operations that ran out of retries eligible again.
    pub async fn retry_failed(&self) -> Result<usize> {
        self.ctx
            .queue
            .lock()
            .await
            .reset_exhausted(self.settings.max_retries)
    }

    /// What a status indicator needs to render.
    pub async fn status(&self) -> StatusSnapshot {
        let pending_count = self.ctx.queue.lock().await.pending_count();
        StatusSnapshot {
            is_online: self.ctx.monitor.is_online(),
            is_syncing: self.ctx.tracker.is_syncing(),
            last_sync_attempt: self.ctx.tracker.last_sync_attempt(),
            last_successful_sync: self.ctx.tracker.last_successful_sync(),
            pending_count,
        }
    }

    /// Returns true while the auto-sync task runs.
    pub fn is_auto_syncing(&self) -> bool {
        self.auto_sync
            .as_ref()
            .is_some_and(|auto| !auto.task.is_finished())
    }

    /// Spawns the periodic sync task for `user_id`.
    ///
    /// The task syncs immediately, then every `interval`, and also whenever
    /// the monitor goes from offline to online. A running task is replaced.
    pub fn start_auto_sync(&mut self, user_id: &str, interval: Duration) {
        self.shutdown();

        let ctx = self.ctx.clone();
        let user_id = user_id.to_string();
        let (task, abort) = abortable(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut online = ctx.monitor.subscribe();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = online.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if !*online.borrow_and_update() {
                            continue;
                        }
                        tracing::info!("back online, syncing");
                    }
                }

                if let Err(e) = ctx.sync_now(&user_id).await {
                    tracing::error!(error = %e, "auto sync failed");
                }
            }
        });

        let task = tokio::spawn(async move {
            let _ = task.await;
        });
        tracing::debug!(interval_secs = interval.as_secs(), "auto sync started");
        self.auto_sync = Some(AutoSync { abort, task });
    }

    /// Stops the auto-sync task, if any.
    pub fn shutdown(&mut self) {
        if let Some(auto) = self.auto_sync.take() {
            auto.abort.abort();
            auto.task.abort();
            tracing::debug!("auto sync stopped");
        }
    }
}

impl Drop for SyncService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
