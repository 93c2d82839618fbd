// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Headless Chromium-family runtime driven through `--dump-dom`.

use super::{condense, text_surface, LaunchOptions, PageFetcher, PageOutcome, RuntimeError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

/// Executable names probed on `PATH`, in preference order.
pub const SYSTEM_BROWSERS: &[&str] =
    &["chromium", "chromium-browser", "google-chrome", "microsoft-edge", "brave-browser"];

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// First Chromium-family browser found on `PATH`.
pub fn find_system_browser() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
    SYSTEM_BROWSERS
        .iter()
        .flat_map(|name| dirs.iter().map(move |dir| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

pub struct BrowserPageFetcher {
    executable: PathBuf,
    label: String,
    options: LaunchOptions,
}

impl BrowserPageFetcher {
    /// Verify `executable` answers `--version` before handing out a fetcher.
    pub async fn launch(
        executable: impl Into<PathBuf>,
        options: LaunchOptions,
    ) -> Result<Self, RuntimeError> {
        let executable = executable.into();
        let unavailable = |message: String| RuntimeError::Unavailable {
            runtime: executable.display().to_string(),
            message,
        };

        let mut cmd = tokio::process::Command::new(&executable);
        cmd.arg("--version").stdin(Stdio::null()).kill_on_drop(true);
        let output = match tokio::time::timeout(VERSION_TIMEOUT, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(unavailable(e.to_string())),
            Err(_) => return Err(unavailable("timed out reading version".to_string())),
        };
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(unavailable(format!(
                "exit {}: {}",
                output.status.code().unwrap_or(-1),
                condense(&stderr, 220)
            )));
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !options.headless {
            tracing::warn!(browser = %version, "dump-dom runtime is always headless");
        }
        if let Some(dir) = &options.profile_dir {
            std::fs::create_dir_all(dir.join("chromium"))
                .map_err(|e| unavailable(format!("profile dir: {e}")))?;
        }

        let label = if version.is_empty() { executable.display().to_string() } else { version };
        Ok(Self { executable, label, options })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, url: &str, wait: Duration) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.executable);
        cmd.arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--ignore-certificate-errors")
            .arg("--dump-dom")
            .arg(format!("--virtual-time-budget={}", wait.as_millis()));
        if let Some(dir) = &self.options.profile_dir {
            cmd.arg(format!("--user-data-dir={}", dir.join("chromium").display()));
        }
        cmd.arg(url).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PageFetcher for BrowserPageFetcher {
    fn name(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self, url: &str, wait: Duration) -> PageOutcome {
        let timeout = LaunchOptions { page_wait: wait, ..self.options.clone() }.navigation_timeout();
        let output = match tokio::time::timeout(timeout, self.command(url, wait).output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return PageOutcome::failed(e.to_string()),
            Err(_) => {
                return PageOutcome::failed(format!(
                    "navigation timeout of {} ms exceeded",
                    timeout.as_millis()
                ))
            }
        };
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return PageOutcome::failed(format!(
                "browser exit {}: {}",
                output.status.code().unwrap_or(-1),
                stderr
            ));
        }
        let dom = String::from_utf8_lossy(&output.stdout);
        // --dump-dom cannot observe the response status
        PageOutcome { status: None, text: text_surface(&dom), error: None }
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
