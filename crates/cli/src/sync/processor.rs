// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue processor.
//!
//! Replays queued operations against the remote store, one at a time and in
//! enqueue order:
//!
//! ```text
//! offline? ──yes──► skip {0, 0}
//!    │no
//! probe ok? ──no──► mark offline, skip {0, 0}
//!    │yes
//! purge completed
//!    │
//! for each retryable op of the user:
//!    processing ──► dispatch ──► completed | failed(error)
//!    │
//! one aggregate toast (+ warning if retries ran out)
//! ```
//!
//! A failing operation never aborts the batch. The queue lock is never held
//! across a remote call.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use spot_core::{Action, ChargingSession, Entity, FavoritePayload, SyncOperation, SyncStatus};
use tokio::sync::Mutex;

use super::monitor::NetworkMonitor;
use super::queue::SyncQueue;
use super::remote::{Filter, RemoteError, RemoteResult, RemoteStore, Table};
use crate::notify::{Notifier, Toast};

/// Why a batch did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The cached flag says offline.
    Offline,
    /// The active probe failed.
    Unreachable,
    /// Another batch is in flight.
    AlreadySyncing,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Offline => "offline",
            SkipReason::Unreachable => "unreachable",
            SkipReason::AlreadySyncing => "already syncing",
        }
    }
}

/// Outcome of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub processed_count: usize,
    pub error_count: usize,
    /// Operations that failed in this batch and have no retries left.
    pub exhausted_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl BatchResult {
    pub fn skipped(reason: SkipReason) -> Self {
        BatchResult {
            skipped: Some(reason),
            ..BatchResult::default()
        }
    }

    /// True if the batch ran and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_none() && self.error_count == 0
    }
}

/// Error raised while replaying a single operation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("unsupported action '{action}' for {entity}")]
    Unsupported { entity: Entity, action: Action },

    #[error("invalid {entity} payload: {reason}")]
    Payload { entity: Entity, reason: String },
}

/// Drains the sync queue against a remote store.
#[derive(Clone)]
pub struct SyncProcessor {
    queue: Arc<Mutex<SyncQueue>>,
    monitor: NetworkMonitor,
    remote: Arc<dyn RemoteStore>,
    notifier: Arc<dyn Notifier>,
    max_retries: u32,
}

impl SyncProcessor {
    pub fn new(
        queue: Arc<Mutex<SyncQueue>>,
        monitor: NetworkMonitor,
        remote: Arc<dyn RemoteStore>,
        notifier: Arc<dyn Notifier>,
        max_retries: u32,
    ) -> Self {
        SyncProcessor {
            queue,
            monitor,
            remote,
            notifier,
            max_retries,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Runs one batch for `user_id`.
    ///
    /// Connectivity problems yield a skipped result, not an error. Errors are
    /// local storage failures only.
    pub async fn process_queue_with_connected_user(
        &self,
        user_id: &str,
    ) -> spot_core::Result<BatchResult> {
        if !self.monitor.is_online() {
            tracing::debug!("offline, skipping sync");
            return Ok(BatchResult::skipped(SkipReason::Offline));
        }
        if !self.monitor.check_actual_connectivity().await {
            tracing::info!("connectivity probe failed, skipping sync");
            self.monitor.set_online(false);
            return Ok(BatchResult::skipped(SkipReason::Unreachable));
        }

        let batch: Vec<SyncOperation> = {
            let mut queue = self.queue.lock().await;
            queue.clear_completed_operations()?;
            queue
                .retryable_operations(self.max_retries)
                .into_iter()
                .filter(|op| op.belongs_to(user_id))
                .collect()
        };
        tracing::info!(count = batch.len(), user_id, "processing sync queue");

        let mut result = BatchResult::default();
        for op in batch {
            self.queue
                .lock()
                .await
                .update_operation_status(&op.id, SyncStatus::Processing, None)?;

            let outcome = sync_operation(self.remote.as_ref(), user_id, &op).await;

            let mut queue = self.queue.lock().await;
            match outcome {
                Ok(()) => {
                    queue.update_operation_status(&op.id, SyncStatus::Completed, None)?;
                    result.processed_count += 1;
                }
                Err(e) => {
                    tracing::warn!(id = %op.id, entity = %op.entity, error = %e, "operation failed");
                    let failed = queue.update_operation_status(
                        &op.id,
                        SyncStatus::Failed,
                        Some(e.to_string()),
                    )?;
                    result.error_count += 1;
                    if failed.retry_count >= self.max_retries {
                        result.exhausted_count += 1;
                    }
                }
            }
        }

        if let Some(toast) = batch_toast(&result) {
            self.notifier.notify(toast);
        }
        if result.exhausted_count > 0 {
            self.notifier
                .notify(exhausted_toast(result.exhausted_count, self.max_retries));
        }

        tracing::info!(
            processed = result.processed_count,
            errors = result.error_count,
            "sync batch finished"
        );
        Ok(result)
    }
}

/// "1 item" / "N itens".
fn items(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{} itens", n)
    }
}

/// Aggregate toast for a batch, or `None` when nothing was processed.
pub fn batch_toast(result: &BatchResult) -> Option<Toast> {
    let total = result.processed_count + result.error_count;
    if result.skipped.is_some() || total == 0 {
        return None;
    }

    let toast = if result.error_count == 0 {
        let verb = if result.processed_count == 1 {
            "sincronizado"
        } else {
            "sincronizados"
        };
        Toast::success(format!(
            "{} {} com sucesso",
            items(result.processed_count),
            verb
        ))
    } else if result.processed_count > 0 {
        Toast::warning("Sincronização parcial").with_description(format!(
            "{} de {} sincronizados, {} com erro",
            result.processed_count,
            items(total),
            result.error_count
        ))
    } else {
        Toast::error("Falha na sincronização").with_description(format!(
            "Não foi possível sincronizar {}. Nova tentativa será feita.",
            items(result.error_count)
        ))
    };
    Some(toast)
}

/// Warning shown when operations ran out of retries.
pub fn exhausted_toast(count: usize, max_retries: u32) -> Toast {
    let subject = if count == 1 {
        "1 alteração não pôde ser sincronizada".to_string()
    } else {
        format!("{} alterações não puderam ser sincronizadas", count)
    };
    Toast::warning(subject).with_description(format!(
        "Falhou após {} tentativas. Os dados continuam salvos neste dispositivo.",
        max_retries
    ))
}

fn payload<T: serde::de::DeserializeOwned>(op: &SyncOperation) -> Result<T, DispatchError> {
    op.payload().map_err(|e| DispatchError::Payload {
        entity: op.entity,
        reason: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct SessionRef {
    id: i64,
}

/// Remote row of a charging session.
pub fn session_row(session: &ChargingSession, user_id: &str) -> Value {
    json!({
        "id": session.id,
        "user_id": user_id,
        "station_id": session.station_id,
        "station_name": session.station_name,
        "date": session.date,
        "duration": session.duration,
        "energy": session.energy,
        "cost": session.cost,
        "status": session.status.as_str(),
    })
}

/// A replayed create whose row is already on the remote has been applied
/// before: the insert landed but the record was never marked completed.
fn already_applied(op: &SyncOperation, inserted: RemoteResult<()>) -> RemoteResult<()> {
    match inserted {
        Err(RemoteError::Conflict { key, .. }) => {
            tracing::debug!(id = %op.id, entity = %op.entity, %key, "create already on remote");
            Ok(())
        }
        other => other,
    }
}

/// Replays one operation against `remote`.
///
/// Creates are idempotent: an existing row with the same key counts as done.
/// Rows are owned by the operation's user, falling back to the connected one.
pub async fn sync_operation(
    remote: &dyn RemoteStore,
    connected_user: &str,
    op: &SyncOperation,
) -> Result<(), DispatchError> {
    let user_id = op.user_id.as_deref().unwrap_or(connected_user);
    let unsupported = || DispatchError::Unsupported {
        entity: op.entity,
        action: op.action,
    };

    match op.entity {
        Entity::Favorites => match op.action {
            Action::Create => {
                let fav: FavoritePayload = payload(op)?;
                let inserted = remote
                    .insert(
                        Table::Favorites,
                        json!({ "user_id": user_id, "station_id": fav.station_id }),
                    )
                    .await;
                already_applied(op, inserted)?
            }
            Action::Delete => {
                let fav: FavoritePayload = payload(op)?;
                remote
                    .delete(
                        Table::Favorites,
                        Filter::eq("user_id", user_id).and_eq("station_id", fav.station_id),
                    )
                    .await?
            }
            Action::Update => return Err(unsupported()),
        },
        Entity::ChargingHistory => match op.action {
            Action::Create => {
                let session: ChargingSession = payload(op)?;
                let inserted = remote
                    .insert(Table::ChargingHistory, session_row(&session, user_id))
                    .await;
                already_applied(op, inserted)?
            }
            Action::Update => {
                let session: ChargingSession = payload(op)?;
                remote
                    .update(
                        Table::ChargingHistory,
                        Filter::eq("id", session.id).and_eq("user_id", user_id),
                        session_row(&session, user_id),
                    )
                    .await?
            }
            Action::Delete => {
                let session: SessionRef = payload(op)?;
                remote
                    .delete(
                        Table::ChargingHistory,
                        Filter::eq("id", session.id).and_eq("user_id", user_id),
                    )
                    .await?
            }
        },
        Entity::Preferences => match op.action {
            Action::Create | Action::Update => {
                let mut row = match &op.data {
                    Value::Object(map) => map.clone(),
                    _ => {
                        return Err(DispatchError::Payload {
                            entity: op.entity,
                            reason: "expected an object".to_string(),
                        })
                    }
                };
                row.insert("user_id".to_string(), Value::from(user_id));
                remote
                    .upsert(Table::Preferences, Value::Object(row))
                    .await?
            }
            Action::Delete => {
                remote
                    .delete(Table::Preferences, Filter::eq("user_id", user_id))
                    .await?
            }
        },
    }
    Ok(())
}
