// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: directories and the single-instance lock.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;
use tracing::{info, warn};

use super::{Config, LifecycleError};

/// Exclusive hold on `daemon.pid`; released on drop.
#[derive(Debug)]
pub struct DaemonLock {
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    file: File,
    path: PathBuf,
}

impl DaemonLock {
    /// Remove the PID file. The lock itself is released when `self` drops.
    pub fn release(self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }
        info!("Daemon shutdown complete");
    }
}

/// Prepare the state directory and take the daemon lock.
pub fn startup(config: &Config) -> Result<DaemonLock, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;
    std::fs::create_dir_all(&config.paths.profile_dir)?;

    // Open without truncating so a running daemon's PID survives a failed attempt.
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut file = file;
    file.set_len(0)?;
    writeln!(file, "{}", std::process::id())?;

    info!(state_dir = %config.state_dir.display(), "daemon lock acquired");
    Ok(DaemonLock { file, path: config.lock_path.clone() })
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
