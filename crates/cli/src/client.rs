// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the control plane.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use sweep_core::StateRecord;
use sweep_wire::{ApiResponse, ControlRequest, StartRequest, AUTOMATION_PATH};
use thiserror::Error;
use url::Url;

use crate::poller::StatusSource;

/// `start` can include a worker `--version` probe and the spawn grace.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid daemon URL {url:?}: {reason}")]
    BadUrl { url: String, reason: String },

    #[error("daemon unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The daemon answered with `ok: false`.
    #[error("{message}")]
    Rejected { status: u16, message: String, state: Option<Box<StateRecord>> },

    #[error("unexpected reply (HTTP {status}): {detail}")]
    Decode { status: u16, detail: String },
}

#[derive(Debug, Clone)]
pub struct ControlClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ControlClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let bad = |reason: String| ClientError::BadUrl { url: base.to_string(), reason };
        let endpoint = Url::parse(base)
            .and_then(|u| u.join(AUTOMATION_PATH))
            .map_err(|e| bad(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(bad("expected an http(s) URL".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| bad(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn status(&self) -> Result<StateRecord, ClientError> {
        let reply = self.http.get(self.endpoint.clone()).send().await;
        self.read(reply).await
    }

    pub async fn start(&self, request: StartRequest) -> Result<StateRecord, ClientError> {
        self.post(&ControlRequest::Start(request)).await
    }

    pub async fn stop(&self) -> Result<StateRecord, ClientError> {
        self.post(&ControlRequest::Stop).await
    }

    async fn post(&self, request: &ControlRequest) -> Result<StateRecord, ClientError> {
        let reply = self.http.post(self.endpoint.clone()).json(request).send().await;
        self.read(reply).await
    }

    async fn read(
        &self,
        reply: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<StateRecord, ClientError> {
        let unreachable =
            |source| ClientError::Unreachable { url: self.endpoint.to_string(), source };
        let reply = reply.map_err(unreachable)?;
        let status = reply.status();
        let bytes = reply.bytes().await.map_err(unreachable)?;
        interpret(status, &bytes)
    }
}

/// Map an HTTP reply onto a state or a typed failure.
pub(crate) fn interpret(status: StatusCode, body: &[u8]) -> Result<StateRecord, ClientError> {
    let decoded: ApiResponse = serde_json::from_slice(body).map_err(|e| ClientError::Decode {
        status: status.as_u16(),
        detail: e.to_string(),
    })?;
    match decoded {
        ApiResponse { ok: true, state: Some(state), .. } if status.is_success() => Ok(state),
        ApiResponse { state, error, .. } => Err(ClientError::Rejected {
            status: status.as_u16(),
            message: error.unwrap_or_else(|| format!("request failed (HTTP {})", status.as_u16())),
            state: state.map(Box::new),
        }),
    }
}

#[async_trait]
impl StatusSource for ControlClient {
    async fn fetch_status(&self) -> Result<StateRecord, ClientError> {
        self.status().await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
