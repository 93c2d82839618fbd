// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence-based cancellation marker for a worker in another process.

use std::path::{Path, PathBuf};

use sweep_core::CancelSignal;

use crate::json_file::StoreError;

/// The file's existence is the request; its content is informational.
///
/// Created by the orchestrator on stop, removed by the orchestrator before
/// a new job starts. The worker only ever observes it.
#[derive(Debug, Clone)]
pub struct StopFlag {
    path: PathBuf,
}

impl StopFlag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the flag. Idempotent: an existing flag is simply rewritten.
    pub fn raise(&self, note: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io { path: parent.to_path_buf(), source: e })?;
        }
        std::fs::write(&self.path, note)
            .map_err(|e| StoreError::Io { path: self.path.clone(), source: e })
    }

    /// Remove a stale flag. Absent is fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io { path: self.path.clone(), source: e }),
        }
    }

    pub fn is_raised(&self) -> bool {
        self.path.exists()
    }
}

impl CancelSignal for StopFlag {
    fn is_cancelled(&self) -> bool {
        self.is_raised()
    }
}

#[cfg(test)]
#[path = "stop_flag_tests.rs"]
mod tests;
