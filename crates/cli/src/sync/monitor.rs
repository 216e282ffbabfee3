// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network connectivity monitor.
//!
//! Keeps a cached online flag that connectivity events update through
//! [`NetworkMonitor::set_online`], and runs an active [`Probe`] on demand.
//! Subscribers receive every transition through a watch channel.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use tokio::sync::watch;

use super::request::with_timeout;

/// Boxed future returned by [`Probe::check`].
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

/// Active connectivity check.
pub trait Probe: Send + Sync {
    /// Resolves to true if the network is actually reachable.
    fn check(&self) -> ProbeFuture<'_>;
}

/// Probe issuing a `HEAD` request to a small endpoint.
///
/// A cache-busting `timestamp` query parameter and `Cache-Control: no-cache`
/// keep intermediaries from answering on the endpoint's behalf. Any error or
/// non-2xx status counts as offline.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(url: &str, timeout: Duration) -> Self {
        HttpProbe {
            client: reqwest::Client::new(),
            url: url.to_string(),
            timeout,
        }
    }
}

impl Probe for HttpProbe {
    fn check(&self) -> ProbeFuture<'_> {
        Box::pin(async move {
            let timestamp = Utc::now().timestamp_millis();
            let request = self
                .client
                .head(&self.url)
                .query(&[("timestamp", timestamp)])
                .header(CACHE_CONTROL, "no-cache")
                .send();

            match with_timeout(self.timeout, request).await {
                Ok(Ok(response)) if response.status().is_success() => true,
                Ok(Ok(response)) => {
                    tracing::debug!(status = response.status().as_u16(), "connectivity probe rejected");
                    false
                }
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "connectivity probe failed");
                    false
                }
                Err(e) => {
                    tracing::debug!(error = %e, "connectivity probe gave up");
                    false
                }
            }
        })
    }
}

/// Probe with a settable answer.
///
/// Used for `--offline` runs and in tests.
#[derive(Debug, Default)]
pub struct FixedProbe {
    reachable: AtomicBool,
}

impl FixedProbe {
    pub fn new(reachable: bool) -> Self {
        FixedProbe {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn set(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

impl Probe for FixedProbe {
    fn check(&self) -> ProbeFuture<'_> {
        let reachable = self.reachable.load(Ordering::SeqCst);
        Box::pin(async move { reachable })
    }
}

/// Cached connectivity state plus an active probe.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct NetworkMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    online: watch::Sender<bool>,
    /// Milliseconds since the epoch of the last transition to online, 0 if never.
    last_online_ms: AtomicI64,
    probe: Arc<dyn Probe>,
}

impl std::fmt::Debug for NetworkMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkMonitor")
            .field("online", &self.is_online())
            .field("last_online", &self.last_online())
            .finish()
    }
}

impl NetworkMonitor {
    /// Creates a monitor with an initial cached state.
    pub fn new(probe: Arc<dyn Probe>, online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        let last_online_ms = if online {
            Utc::now().timestamp_millis()
        } else {
            0
        };
        NetworkMonitor {
            inner: Arc::new(MonitorInner {
                online: tx,
                last_online_ms: AtomicI64::new(last_online_ms),
                probe,
            }),
        }
    }

    /// Cached online flag.
    pub fn is_online(&self) -> bool {
        *self.inner.online.borrow()
    }

    /// Last time the monitor went online, if it ever did.
    pub fn last_online(&self) -> Option<DateTime<Utc>> {
        match self.inner.last_online_ms.load(Ordering::Acquire) {
            0 => None,
            ms => DateTime::from_timestamp_millis(ms),
        }
    }

    /// Records a connectivity event.
    ///
    /// Subscribers are only woken when the flag actually changes.
    pub fn set_online(&self, online: bool) {
        if online {
            self.inner
                .last_online_ms
                .store(Utc::now().timestamp_millis(), Ordering::Release);
        }
        let changed = self.inner.online.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        });
        if changed {
            if online {
                tracing::info!("connection restored, online");
            } else {
                tracing::info!("connection lost, offline");
            }
        }
    }

    /// Receiver observing every transition of the online flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.online.subscribe()
    }

    /// Runs the active probe. Does not touch the cached flag.
    pub async fn check_actual_connectivity(&self) -> bool {
        self.inner.probe.check().await
    }

    /// Runs the active probe and stores its answer in the cached flag.
    pub async fn refresh(&self) -> bool {
        let online = self.check_actual_connectivity().await;
        self.set_online(online);
        online
    }
}
