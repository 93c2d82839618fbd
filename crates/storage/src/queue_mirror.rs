// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use sweep_core::QueueMirror;

use crate::json_file::{read_json, write_json_atomic, StoreError};

/// Writes the standalone pending-queue snapshot.
#[derive(Debug, Clone)]
pub struct QueueMirrorStore {
    path: PathBuf,
}

impl QueueMirrorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, mirror: &QueueMirror) -> Result<(), StoreError> {
        write_json_atomic(&self.path, mirror)
    }

    pub fn load(&self) -> Result<QueueMirror, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}
