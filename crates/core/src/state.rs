// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared run-status record polled by the control plane.
//!
//! The worker owns this record for the duration of a run. Outside a run the
//! orchestrator bootstraps it, and while a run is active the only foreign
//! writes are `stop_requested`/`pid` (orchestrator) and `running=false`
//! (liveness reconciliation).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::JobId;
use crate::job::JobDescriptor;

/// Capacity of the newest-first log ring buffer.
pub const MAX_LOGS: usize = 300;

/// Severity of an operator-facing log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Note,
    Ok,
    Warn,
    Err,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Note => "note",
            LogLevel::Ok => "ok",
            LogLevel::Warn => "warn",
            LogLevel::Err => "err",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Current run status. Unknown fields in a persisted record are ignored;
/// missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRecord {
    pub running: bool,
    /// Worker process id, 0 when unknown.
    pub pid: u32,
    pub job_id: JobId,
    pub message: String,
    pub started_at: String,
    pub finished_at: String,
    pub updated_at: String,
    pub current_url: String,
    pub current_index: usize,
    pub pending_urls: Vec<String>,
    pub pending_count: usize,
    /// Fixed at job start to the initial URL count.
    pub total_count: usize,
    /// Never decreases within a run.
    pub removed_count: usize,
    /// URLs fetched so far in this run.
    pub scan_count: u64,
    /// Passes over the queue; starts at 1.
    pub lap_count: u64,
    pub keywords: Vec<String>,
    /// Newest first, at most [`MAX_LOGS`] entries.
    pub logs: Vec<LogEntry>,
    pub stop_requested: bool,
}

impl Default for StateRecord {
    fn default() -> Self {
        Self {
            running: false,
            pid: 0,
            job_id: JobId::default(),
            message: "idle".to_string(),
            started_at: String::new(),
            finished_at: String::new(),
            updated_at: String::new(),
            current_url: String::new(),
            current_index: 0,
            pending_urls: Vec::new(),
            pending_count: 0,
            total_count: 0,
            removed_count: 0,
            scan_count: 0,
            lap_count: 0,
            keywords: Vec::new(),
            logs: Vec::new(),
            stop_requested: false,
        }
    }
}

impl StateRecord {
    /// Record written by the orchestrator just before spawning a worker.
    pub fn bootstrap(job: &JobDescriptor, now: &str) -> Self {
        let mut state = Self {
            running: true,
            job_id: job.job_id.clone(),
            message: "starting worker".to_string(),
            started_at: now.to_string(),
            updated_at: now.to_string(),
            total_count: job.urls.len(),
            lap_count: 1,
            keywords: job.keywords.clone(),
            ..Self::default()
        };
        state.set_pending(job.urls.clone());
        state.push_log(now, LogLevel::Note, "worker starting");
        state
    }

    /// Prepend a log entry, evicting the oldest beyond [`MAX_LOGS`].
    pub fn push_log(&mut self, now: &str, level: LogLevel, message: impl Into<String>) {
        self.logs.insert(0, LogEntry { time: now.to_string(), level, message: message.into() });
        self.logs.truncate(MAX_LOGS);
    }

    /// Replace the pending queue, keeping `pending_count` in step.
    pub fn set_pending(&mut self, pending: Vec<String>) {
        self.pending_count = pending.len();
        self.pending_urls = pending;
    }

    /// Remove the pending URL at `index`, counting it as removed.
    pub fn remove_pending(&mut self, index: usize) -> Option<String> {
        if index >= self.pending_urls.len() {
            return None;
        }
        let url = self.pending_urls.remove(index);
        self.pending_count = self.pending_urls.len();
        self.removed_count += 1;
        Some(url)
    }

    /// `pending_count` tracks the queue, and removals account for every
    /// URL missing from the original set.
    pub fn queue_consistent(&self) -> bool {
        self.pending_count == self.pending_urls.len()
            && self.pending_count + self.removed_count == self.total_count
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
