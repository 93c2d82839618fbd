// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

/// Locations of the artifacts exchanged between control plane and worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    pub state: PathBuf,
    pub job: PathBuf,
    pub queue: PathBuf,
    pub stop: PathBuf,
    /// Worker stdout/stderr
    pub worker_log: PathBuf,
    /// Advisory lock serializing `start`
    pub start_lock: PathBuf,
    /// Persistent browser session directory
    pub profile_dir: PathBuf,
}

impl RuntimePaths {
    /// Fixed layout under a single runtime directory.
    pub fn under(dir: &Path) -> Self {
        Self {
            state: dir.join("state.json"),
            job: dir.join("job.json"),
            queue: dir.join("queue.json"),
            stop: dir.join("stop.flag"),
            worker_log: dir.join("worker.log"),
            start_lock: dir.join("start.lock"),
            profile_dir: dir.join("browser_profile"),
        }
    }
}
