// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Page fetching: the headless-browser / HTTP capability behind the scan loop.

mod browser;
mod extract;
mod http;

pub use browser::{find_system_browser, BrowserPageFetcher};
pub use extract::{condense, text_surface, MAX_SURFACE_CHARS};
pub use http::HttpPageFetcher;

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result of one fetch. Errors are data, not control flow: a failed fetch
/// is reported here and the caller decides what it means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutcome {
    /// HTTP status when the runtime can observe one
    pub status: Option<u16>,
    /// Title, visible text and markup, concatenated
    pub text: String,
    /// Short diagnostic when navigation or extraction failed
    pub error: Option<String>,
}

impl PageOutcome {
    pub fn failed(message: impl AsRef<str>) -> Self {
        Self { error: Some(condense(message.as_ref(), 220)), ..Self::default() }
    }
}

/// Errors acquiring an automation runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{runtime} unavailable: {message}")]
    Unavailable { runtime: String, message: String },
}

/// Options shared by every runtime launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub headless: bool,
    pub page_wait: Duration,
    /// Persistent session directory, if the job configured one
    pub profile_dir: Option<PathBuf>,
    /// Previously saved session blob to restore
    pub session: Option<Vec<u8>>,
}

impl LaunchOptions {
    /// Navigation timeout: the settle wait plus ten seconds, at least twenty.
    pub fn navigation_timeout(&self) -> Duration {
        (self.page_wait + Duration::from_secs(10)).max(Duration::from_secs(20))
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Human-readable runtime label for logs
    fn name(&self) -> String;

    /// Navigate to `url`, let it settle for up to `wait`, and extract text.
    async fn fetch(&self, url: &str, wait: Duration) -> PageOutcome;

    /// Opaque session blob to persist for the next run.
    async fn export_session(&self) -> Option<Vec<u8>> {
        None
    }

    /// Release the runtime.
    async fn close(&self) {}
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{PageFetcher, PageOutcome};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    type FetchHook = Arc<dyn Fn(&str) + Send + Sync>;

    #[derive(Default)]
    struct FakeFetchState {
        pages: HashMap<String, PageOutcome>,
        fetched: Vec<String>,
        closed: bool,
        session: Option<Vec<u8>>,
    }

    /// Scripted fetcher: unknown URLs return an empty 200 page.
    #[derive(Clone, Default)]
    pub struct FakePageFetcher {
        inner: Arc<Mutex<FakeFetchState>>,
        hook: Option<FetchHook>,
        latency: Duration,
    }

    impl FakePageFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` with status 200 for `url`.
        pub fn page(self, url: &str, body: &str) -> Self {
            self.inner.lock().pages.insert(
                url.to_string(),
                PageOutcome { status: Some(200), text: body.to_string(), error: None },
            );
            self
        }

        /// Fail navigation to `url` with `message`.
        pub fn failing(self, url: &str, message: &str) -> Self {
            self.inner.lock().pages.insert(url.to_string(), PageOutcome::failed(message));
            self
        }

        /// Run `hook` after every fetch (e.g. to inspect persisted state).
        pub fn on_fetch(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
            self.hook = Some(Arc::new(hook));
            self
        }

        /// Simulated time each fetch takes.
        pub fn latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub fn with_session(self, blob: &[u8]) -> Self {
            self.inner.lock().session = Some(blob.to_vec());
            self
        }

        pub fn fetched(&self) -> Vec<String> {
            self.inner.lock().fetched.clone()
        }

        pub fn is_closed(&self) -> bool {
            self.inner.lock().closed
        }
    }

    #[async_trait]
    impl PageFetcher for FakePageFetcher {
        fn name(&self) -> String {
            "fake runtime".to_string()
        }

        async fn fetch(&self, url: &str, _wait: Duration) -> PageOutcome {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let outcome = {
                let mut inner = self.inner.lock();
                inner.fetched.push(url.to_string());
                inner.pages.get(url).cloned().unwrap_or(PageOutcome {
                    status: Some(200),
                    text: String::new(),
                    error: None,
                })
            };
            if let Some(hook) = &self.hook {
                hook(url);
            }
            outcome
        }

        async fn export_session(&self) -> Option<Vec<u8>> {
            self.inner.lock().session.clone()
        }

        async fn close(&self) {
            self.inner.lock().closed = true;
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePageFetcher;
