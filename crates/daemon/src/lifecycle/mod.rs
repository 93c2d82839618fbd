// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

mod startup;
pub use startup::{startup, DaemonLock};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use sweep_storage::RuntimePaths;
use thiserror::Error;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/sweep)
    pub state_dir: PathBuf,
    /// Job, state, queue, stop flag and worker log locations
    pub paths: RuntimePaths,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// HTTP listen address
    pub addr: SocketAddr,
    /// Explicit worker binary, if configured
    pub worker_bin: Option<PathBuf>,
    /// Wait after spawning before `start` replies
    pub spawn_grace: Duration,
    /// How long a pid-less running state is trusted
    pub pid_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let mut config = Self::under(env::state_dir()?);
        config.addr = env::listen_addr()?;
        config.worker_bin = env::worker_bin();
        config.spawn_grace = env::spawn_grace();
        config.pid_timeout = env::pid_timeout();
        Ok(config)
    }

    /// Default configuration rooted at `state_dir`.
    pub fn under(state_dir: PathBuf) -> Self {
        Self {
            paths: RuntimePaths::under(&state_dir),
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            addr: SocketAddr::from(([127, 0, 0, 1], 7878)),
            worker_bin: None,
            spawn_grace: Duration::from_secs(1),
            pid_timeout: Duration::from_secs(20),
            state_dir,
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Invalid listen address: {0}")]
    BadAddr(String),

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
