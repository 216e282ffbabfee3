// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync of user data.
//!
//! Mutations are recorded in a persistent queue and replayed against a
//! remote store once the network is back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌────────────────┐
//! │  Processor  │────►│ RemoteStore │────►│    Backend     │
//! │             │     │   (trait)   │     │ REST/file/mem  │
//! └─────────────┘     └─────────────┘     └────────────────┘
//!   │        │
//!   ▼        ▼
//! ┌───────┐ ┌─────────┐
//! │ Queue │ │ Monitor │  (cached flag + active probe)
//! └───────┘ └─────────┘
//! ```
//!
//! [`SyncService`] owns all of the above plus the status tracker and the
//! notifier, and runs the optional auto-sync task.

mod file;
mod memory;
mod monitor;
mod processor;
mod queue;
mod remote;
mod request;
mod rest;
mod service;
mod status;

pub use file::FileRemote;
pub use memory::MemoryRemote;
pub use monitor::{FixedProbe, HttpProbe, NetworkMonitor, Probe, ProbeFuture};
pub use processor::{
    batch_toast, exhausted_toast, session_row, sync_operation, BatchResult, DispatchError,
    SkipReason, SyncProcessor,
};
pub use queue::{SyncQueue, QUEUE_KEY};
pub use remote::{Filter, RemoteError, RemoteFuture, RemoteResult, RemoteStore, Table};
pub use request::{
    abortable, with_retry, with_retry_if, with_timeout, RequestError, RetryPolicy,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use rest::RestRemote;
pub use service::{SyncService, SyncSettings, LOCK_NAME, STATUS_KEY};
pub use status::{StatusSnapshot, SyncGuard, SyncStatusTracker, SyncTimes};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Opens the remote store named by `url`.
///
/// - `memory:` in-process tables, lost on exit
/// - `file:<dir>` JSON tables under `<dir>`, relative to `base`
/// - `http://…` / `https://…` REST backend
pub fn open_remote(
    url: &str,
    api_key: Option<&str>,
    timeout: Duration,
    base: &Path,
) -> RemoteResult<Arc<dyn RemoteStore>> {
    if url == "memory:" {
        return Ok(Arc::new(MemoryRemote::new()));
    }
    if let Some(dir) = url.strip_prefix("file:") {
        if dir.is_empty() {
            return Err(RemoteError::Config(
                "file: URL requires a directory".to_string(),
            ));
        }
        return Ok(Arc::new(FileRemote::open(&base.join(dir))?));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(Arc::new(RestRemote::new(url, api_key, timeout)?));
    }
    Err(RemoteError::Config(format!(
        "unsupported remote URL '{}': must be memory:, file:<dir>, http:// or https://",
        url
    )))
}

#[cfg(test)]
pub(crate) mod test_helpers;




#[cfg(test)]
mod monitor_tests;
