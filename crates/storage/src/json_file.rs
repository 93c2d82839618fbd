// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-document JSON persistence.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Serialize `value` and atomically replace `path` with it.
///
/// Each write stages into its own uniquely named temp file in the target's
/// directory and renames it over the target. Concurrent writers never share
/// a staging file, and readers see either the old or the new document.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::Json { path: path.to_path_buf(), source: e })?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    staged.write_all(json.as_bytes()).map_err(|e| StoreError::io(staged.path(), e))?;
    staged.flush().map_err(|e| StoreError::io(staged.path(), e))?;
    staged.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

/// Read and decode `path`. A missing or blank file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Json { path: path.to_path_buf(), source: e })
}

#[cfg(test)]
#[path = "json_file_tests.rs"]
mod tests;
