// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:7878";

/// Resolve state directory: SWEEP_STATE_DIR > XDG_STATE_HOME/sweep > ~/.local/state/sweep
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("SWEEP_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("sweep"));
    }
    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/sweep"))
}

/// Listen address (`SWEEP_ADDR`)
pub fn listen_addr() -> Result<SocketAddr, LifecycleError> {
    let raw = std::env::var("SWEEP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    raw.parse().map_err(|_| LifecycleError::BadAddr(raw))
}

/// Explicit worker binary, skipping discovery
pub fn worker_bin() -> Option<PathBuf> {
    std::env::var("SWEEP_WORKER_BIN").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Settle wait after spawning before `start` replies (default 1s)
pub fn spawn_grace() -> Duration {
    std::env::var("SWEEP_SPAWN_GRACE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}

/// How long a running state without a pid is trusted (default 20s)
pub fn pid_timeout() -> Duration {
    std::env::var("SWEEP_PID_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(20))
}

/// Tracing filter, default `info`
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
