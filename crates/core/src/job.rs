// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job descriptor: the write-once input to one worker run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::id::JobId;
use crate::normalize::{clamp_ms, normalize_keywords, normalize_urls};

/// Bounds applied to submitted and loaded jobs.
#[derive(Debug, Clone, Copy)]
pub struct Limits;

impl Limits {
    pub const MAX_URLS: usize = 5000;
    pub const MAX_KEYWORDS: usize = 100;
    pub const MAX_KEYWORD_LEN: usize = 120;

    pub const DEFAULT_DELAY_MS: u64 = 12_000;
    pub const MIN_DELAY_MS: u64 = 1_000;
    pub const MAX_DELAY_MS: u64 = 300_000;

    pub const DEFAULT_PAGE_WAIT_MS: u64 = 8_000;
    /// Page wait bounds enforced at submission.
    pub const MIN_PAGE_WAIT_MS: u64 = 1_000;
    pub const MAX_PAGE_WAIT_MS: u64 = 120_000;
    /// Looser page wait bounds the worker accepts from a job file.
    pub const WORKER_MIN_PAGE_WAIT_MS: u64 = 500;
    pub const WORKER_MAX_PAGE_WAIT_MS: u64 = 180_000;
}

/// Input to a worker run. Written once by the orchestrator, read once by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub job_id: JobId,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_page_wait_ms")]
    pub page_wait_ms: u64,
    #[serde(default)]
    pub headless: bool,
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
}

fn default_delay_ms() -> u64 {
    Limits::DEFAULT_DELAY_MS
}

fn default_page_wait_ms() -> u64 {
    Limits::DEFAULT_PAGE_WAIT_MS
}

impl JobDescriptor {
    /// Re-apply normalization with the worker-side bounds.
    pub fn normalized_for_worker(mut self) -> Self {
        self.urls = normalize_urls(&self.urls);
        self.keywords = normalize_keywords(&self.keywords);
        self.delay_ms = clamp_ms(
            Some(self.delay_ms as i64),
            Limits::DEFAULT_DELAY_MS,
            Limits::MIN_DELAY_MS,
            Limits::MAX_DELAY_MS,
        );
        self.page_wait_ms = clamp_ms(
            Some(self.page_wait_ms as i64),
            Limits::DEFAULT_PAGE_WAIT_MS,
            Limits::WORKER_MIN_PAGE_WAIT_MS,
            Limits::WORKER_MAX_PAGE_WAIT_MS,
        );
        self.profile_dir = self.profile_dir.filter(|p| !p.as_os_str().is_empty());
        self
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
