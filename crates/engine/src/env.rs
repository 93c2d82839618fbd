// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker.

use std::path::PathBuf;

/// Bundled headless browser executable, tried before any system browser.
pub fn browser_path() -> Option<PathBuf> {
    std::env::var("SWEEP_BROWSER_PATH").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Disable the built-in HTTP fallback (`SWEEP_NO_HTTP_FALLBACK=1`).
pub fn http_fallback_disabled() -> bool {
    matches!(
        std::env::var("SWEEP_NO_HTTP_FALLBACK").ok().as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Tracing filter for worker stderr, default `info`.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
