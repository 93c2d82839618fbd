// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State and job file stores.

use std::path::{Path, PathBuf};

use sweep_core::{JobDescriptor, StateRecord};

use crate::json_file::{read_json, write_json_atomic, StoreError};

/// Persistence for the shared [`StateRecord`].
///
/// Single-writer contract: while a run is active the worker is the only
/// writer, apart from the orchestrator's `stop_requested`/`pid` updates and
/// liveness reconciliation flipping `running` off.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, falling back to the default when the file is
    /// absent or unreadable so status queries always have an answer.
    pub fn load(&self) -> StateRecord {
        match read_json::<StateRecord>(&self.path) {
            Ok(Some(state)) => state,
            Ok(None) => StateRecord::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable state file, using defaults");
                StateRecord::default()
            }
        }
    }

    /// Overwrite the record wholesale.
    pub fn save(&self, state: &StateRecord) -> Result<(), StoreError> {
        write_json_atomic(&self.path, state)
    }
}

/// Persistence for the write-once [`JobDescriptor`].
#[derive(Debug, Clone)]
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write(&self, job: &JobDescriptor) -> Result<(), StoreError> {
        write_json_atomic(&self.path, job)
    }

    /// Load the job. `Ok(None)` when no job file exists.
    pub fn load(&self) -> Result<Option<JobDescriptor>, StoreError> {
        read_json(&self.path)
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
