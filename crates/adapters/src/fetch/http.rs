// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain HTTP runtime: no script execution, but always available.

use super::{text_surface, LaunchOptions, PageFetcher, PageOutcome, RuntimeError};
use async_trait::async_trait;
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("sweep-worker/", env!("CARGO_PKG_VERSION"));

pub struct HttpPageFetcher {
    client: reqwest::Client,
    options: LaunchOptions,
    /// RFC 6265 cookie jar shared with the client; exported as the session blob.
    cookies: Arc<CookieStoreMutex>,
}

impl HttpPageFetcher {
    pub fn launch(options: LaunchOptions) -> Result<Self, RuntimeError> {
        let store = match &options.session {
            Some(blob) => cookie_store::serde::json::load(blob.as_slice()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable session cookies");
                CookieStore::default()
            }),
            None => CookieStore::default(),
        };
        let cookies = Arc::new(CookieStoreMutex::new(store));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| RuntimeError::Unavailable {
                runtime: "http client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { client, options, cookies })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> String {
        "http client".to_string()
    }

    async fn fetch(&self, url: &str, wait: Duration) -> PageOutcome {
        let timeout = LaunchOptions { page_wait: wait, ..self.options.clone() }.navigation_timeout();

        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return PageOutcome::failed(e.to_string()),
        };
        let status = response.status().as_u16();

        match response.text().await {
            Ok(body) => {
                // Same settle time a rendered page gets.
                tokio::time::sleep(wait).await;
                PageOutcome { status: Some(status), text: text_surface(&body), error: None }
            }
            Err(e) => PageOutcome { status: Some(status), ..PageOutcome::failed(e.to_string()) },
        }
    }

    async fn export_session(&self) -> Option<Vec<u8>> {
        let store = match self.cookies.lock() {
            Ok(store) => store,
            Err(_) => {
                tracing::warn!("cookie jar poisoned, session not exported");
                return None;
            }
        };
        if store.iter_unexpired().next().is_none() {
            return None;
        }
        let mut blob = Vec::new();
        match cookie_store::serde::json::save_incl_expired_and_nonpersistent(&store, &mut blob) {
            Ok(()) => Some(blob),
            Err(e) => {
                tracing::warn!(error = %e, "session cookies could not be serialized");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
