// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request wrappers: timeout, retry with exponential backoff, and abort.
//!
//! These are independent of the queue and usable around any future.

use std::future::Future;
use std::time::Duration;

use futures_util::future::AbortHandle;

/// Default deadline for a single abortable request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Error type for wrapped requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The deadline passed before the request finished.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The request was cancelled through its [`AbortHandle`].
    #[error("request aborted")]
    Aborted,
}

/// Backoff parameters for [`with_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            retries: 3,
            initial_delay: Duration::from_millis(1000),
            factor: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let multiplier = self.factor.saturating_pow(attempt);
        self.initial_delay.saturating_mul(multiplier)
    }
}

/// Resolves `future`, or fails with [`RequestError::Timeout`] once `duration`
/// has elapsed.
pub async fn with_timeout<F>(duration: Duration, future: F) -> Result<F::Output, RequestError>
where
    F: Future,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| RequestError::Timeout(duration))
}

/// Calls `f` until it succeeds or the policy's retries are spent.
///
/// Returns the last error when every attempt failed.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry_if(policy, |_| true, f).await
}

/// Like [`with_retry`], but only errors accepted by `retryable` are retried.
/// Any other error is returned at once.
pub async fn with_retry_if<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    retryable: R,
    mut f: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= policy.retries || !retryable(&e) => return Err(e),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Wraps `future` so it can be cancelled from elsewhere.
///
/// Awaiting the returned future after [`AbortHandle::abort`] yields
/// [`RequestError::Aborted`].
pub fn abortable<F>(future: F) -> (impl Future<Output = Result<F::Output, RequestError>>, AbortHandle)
where
    F: Future,
{
    let (future, handle) = futures_util::future::abortable(future);
    let wrapped = async move { future.await.map_err(|_| RequestError::Aborted) };
    (wrapped, handle)
}
