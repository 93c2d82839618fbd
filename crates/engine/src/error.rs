// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sweep_storage::StoreError;
use thiserror::Error;

/// Fatal worker errors. Per-URL fetch failures are not errors; they are
/// logged and the URL is retried on the next lap.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("job file could not be loaded: {0}")]
    JobUnreadable(String),

    #[error("job has no valid URLs")]
    NoUrls,

    #[error("job has no valid keywords")]
    NoKeywords,

    #[error("no automation runtime available: {0}")]
    NoRuntime(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
