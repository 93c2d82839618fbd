// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation runtime acquisition.

use crate::WorkerError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use sweep_adapters::{
    find_system_browser, BrowserPageFetcher, HttpPageFetcher, LaunchOptions, PageFetcher,
};
use sweep_core::truncate_chars;

/// Launch failures are joined and cut to this many characters.
const MAX_LAUNCH_ERRORS: usize = 4000;

/// A launched runtime and the operator-facing description of it.
pub struct Acquired {
    pub fetcher: Arc<dyn PageFetcher>,
    pub description: String,
}

#[async_trait]
pub trait RuntimeProvider: Send + Sync {
    async fn acquire(&self, options: &LaunchOptions) -> Result<Acquired, WorkerError>;
}

/// Bundled browser, then a system browser, then the built-in HTTP client.
#[derive(Debug, Clone, Default)]
pub struct RuntimeChain {
    pub bundled: Option<PathBuf>,
    pub system: Option<PathBuf>,
    pub http_fallback: bool,
}

impl RuntimeChain {
    pub fn from_env() -> Self {
        Self {
            bundled: crate::env::browser_path(),
            system: find_system_browser(),
            http_fallback: !crate::env::http_fallback_disabled(),
        }
    }
}

#[async_trait]
impl RuntimeProvider for RuntimeChain {
    async fn acquire(&self, options: &LaunchOptions) -> Result<Acquired, WorkerError> {
        let mut errors = Vec::new();

        let browsers = [("bundled browser", &self.bundled), ("system browser", &self.system)];
        for (kind, path) in browsers {
            let Some(path) = path else { continue };
            match BrowserPageFetcher::launch(path, options.clone()).await {
                Ok(fetcher) => {
                    let description = format!("{kind} {} ({})", path.display(), fetcher.name());
                    return Ok(Acquired { fetcher: Arc::new(fetcher), description });
                }
                Err(e) => {
                    tracing::warn!(runtime = kind, error = %e, "runtime launch failed");
                    errors.push(e.to_string());
                }
            }
        }

        if self.http_fallback {
            match HttpPageFetcher::launch(options.clone()) {
                Ok(fetcher) => {
                    return Ok(Acquired {
                        fetcher: Arc::new(fetcher),
                        description: "built-in http client".to_string(),
                    })
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        if errors.is_empty() {
            errors.push("no runtime configured".to_string());
        }
        let joined = errors.join("\n---\n");
        Err(WorkerError::NoRuntime(truncate_chars(&joined, MAX_LAUNCH_ERRORS).to_string()))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fixed {
    use super::{Acquired, RuntimeProvider};
    use crate::WorkerError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use sweep_adapters::{LaunchOptions, PageFetcher};

    /// Hands out one pre-built fetcher and remembers the options it was asked for.
    #[derive(Clone)]
    pub struct FixedRuntime {
        fetcher: Option<Arc<dyn PageFetcher>>,
        seen: Arc<Mutex<Vec<LaunchOptions>>>,
    }

    impl FixedRuntime {
        pub fn new(fetcher: impl PageFetcher + 'static) -> Self {
            Self { fetcher: Some(Arc::new(fetcher)), seen: Arc::default() }
        }

        /// A runtime that can never be launched.
        pub fn unavailable() -> Self {
            Self { fetcher: None, seen: Arc::default() }
        }

        pub fn launches(&self) -> Vec<LaunchOptions> {
            self.seen.lock().clone()
        }
    }

    #[async_trait]
    impl RuntimeProvider for FixedRuntime {
        async fn acquire(&self, options: &LaunchOptions) -> Result<Acquired, WorkerError> {
            self.seen.lock().push(options.clone());
            match &self.fetcher {
                Some(fetcher) => Ok(Acquired {
                    fetcher: Arc::clone(fetcher),
                    description: fetcher.name(),
                }),
                None => Err(WorkerError::NoRuntime("fixed runtime unavailable".to_string())),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fixed::FixedRuntime;

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
