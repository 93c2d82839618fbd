// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Finding and verifying the worker executable.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

/// Name of the worker binary and the prefix of its `--version` output.
pub const WORKER_NAME: &str = "sweep-worker";

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WorkerLocator: Send + Sync {
    /// A verified worker executable, or a reason none is usable.
    async fn locate(&self) -> Result<PathBuf, String>;
}

/// Explicit path, then a sibling of the running executable, then `PATH`.
#[derive(Debug, Clone, Default)]
pub struct BinaryLocator {
    explicit: Option<PathBuf>,
}

impl BinaryLocator {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.explicit {
            return vec![path.clone()];
        }
        let mut out = Vec::new();
        if let Some(dir) = std::env::current_exe().ok().as_deref().and_then(Path::parent) {
            out.push(dir.join(WORKER_NAME));
        }
        if let Some(path) = std::env::var_os("PATH") {
            out.extend(std::env::split_paths(&path).map(|dir| dir.join(WORKER_NAME)));
        }
        out
    }
}

#[async_trait]
impl WorkerLocator for BinaryLocator {
    async fn locate(&self) -> Result<PathBuf, String> {
        let mut reasons = Vec::new();
        for candidate in self.candidates() {
            if !candidate.is_file() {
                continue;
            }
            match verify(&candidate).await {
                Ok(version) => {
                    tracing::debug!(worker = %candidate.display(), %version, "worker verified");
                    return Ok(candidate);
                }
                Err(reason) => reasons.push(format!("{}: {reason}", candidate.display())),
            }
        }
        if reasons.is_empty() {
            return Err(format!("{WORKER_NAME} not found"));
        }
        Err(reasons.join("; "))
    }
}

/// Run `<worker> --version` and require the worker's own banner.
pub async fn verify(worker: &Path) -> Result<String, String> {
    let mut cmd = tokio::process::Command::new(worker);
    cmd.arg("--version").stdin(Stdio::null()).kill_on_drop(true);
    let output = match tokio::time::timeout(VERSION_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(_) => return Err("timed out reading version".to_string()),
    };
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() && stdout.starts_with(WORKER_NAME) {
        Ok(stdout)
    } else {
        Err(format!("unexpected version output {stdout:?}"))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fixed {
    use super::WorkerLocator;
    use async_trait::async_trait;
    use std::path::PathBuf;

    /// Always answers with the same result.
    #[derive(Debug, Clone)]
    pub struct FixedLocator(Result<PathBuf, String>);

    impl FixedLocator {
        pub fn found(path: impl Into<PathBuf>) -> Self {
            Self(Ok(path.into()))
        }

        pub fn missing(reason: &str) -> Self {
            Self(Err(reason.to_string()))
        }
    }

    #[async_trait]
    impl WorkerLocator for FixedLocator {
        async fn locate(&self) -> Result<PathBuf, String> {
            self.0.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fixed::FixedLocator;

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
