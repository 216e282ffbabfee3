// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! REST remote store.
//!
//! Talks to a PostgREST-style backend: each table lives at
//! `<base>/rest/v1/<table>`, row filters are query pairs of the form
//! `column=eq.value`, and every request carries the project key both as the
//! `apikey` header and as a bearer token.
//!
//! Requests that never got a response are retried with exponential backoff;
//! an answer from the backend, even an error status, is final.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

use super::remote::{Filter, RemoteError, RemoteFuture, RemoteResult, RemoteStore, Table};
use super::request::{with_retry_if, RetryPolicy};

const REST_PREFIX: &str = "rest/v1";

/// Remote store over HTTP.
#[derive(Debug, Clone)]
pub struct RestRemote {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RestRemote {
    /// Builds a client for `base_url`, authenticating with `api_key` when set.
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> RemoteResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| RemoteError::Config(format!("invalid api key: {}", e)))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| RemoteError::Config(format!("invalid api key: {}", e)))?;
            headers.insert(HeaderName::from_static("apikey"), value);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(RestRemote {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the backoff used for transient failures.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// URL of a table endpoint.
    pub fn table_url(&self, table: Table) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, table)
    }

    fn request(&self, method: Method, table: Table, filter: &Filter) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .query(&filter.to_query())
    }

    /// Sends the request made by `build`, rebuilding it for each retry.
    async fn send<B>(&self, table: Table, build: B) -> RemoteResult<Response>
    where
        B: Fn() -> RequestBuilder,
    {
        with_retry_if(&self.retry, RemoteError::is_transient, || {
            self.send_once(table, build())
        })
        .await
    }

    async fn send_once(&self, table: Table, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%table, status = status.as_u16(), "remote call ok");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%table, status = status.as_u16(), %body, "remote call failed");
        if status == reqwest::StatusCode::CONFLICT {
            return Err(RemoteError::Conflict {
                table: table.to_string(),
                key: body,
            });
        }
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl RemoteStore for RestRemote {
    fn insert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.send(table, || {
                self.request(Method::POST, table, &Filter::all())
                    .header("Prefer", "return=minimal")
                    .json(&row)
            })
            .await?;
            Ok(())
        })
    }

    fn update(&self, table: Table, filter: Filter, patch: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.send(table, || {
                self.request(Method::PATCH, table, &filter)
                    .header("Prefer", "return=minimal")
                    .json(&patch)
            })
            .await?;
            Ok(())
        })
    }

    fn upsert(&self, table: Table, row: Value) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let on_conflict = table.key_columns().join(",");
            self.send(table, || {
                self.request(Method::POST, table, &Filter::all())
                    .query(&[("on_conflict", on_conflict.as_str())])
                    .header("Prefer", "resolution=merge-duplicates,return=minimal")
                    .json(&row)
            })
            .await?;
            Ok(())
        })
    }

    fn delete(&self, table: Table, filter: Filter) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.send(table, || self.request(Method::DELETE, table, &filter))
                .await?;
            Ok(())
        })
    }

    fn select(&self, table: Table, filter: Filter) -> RemoteFuture<'_, Vec<Value>> {
        Box::pin(async move {
            let response = self
                .send(table, || {
                    self.request(Method::GET, table, &filter)
                        .query(&[("select", "*")])
                })
                .await?;
            response
                .json::<Vec<Value>>()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))
        })
    }
}
