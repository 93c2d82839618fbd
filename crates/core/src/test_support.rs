// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures and proptest strategies for tests in this and other crates.

use std::path::PathBuf;

use proptest::prelude::*;

use crate::id::JobId;
use crate::job::{JobDescriptor, Limits};

/// A job with default timings over the given URLs and keywords.
pub fn job_fixture(urls: &[&str], keywords: &[&str]) -> JobDescriptor {
    JobDescriptor {
        job_id: JobId::from("job-fixture"),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        urls: urls.iter().map(|u| u.to_string()).collect(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        delay_ms: Limits::MIN_DELAY_MS,
        page_wait_ms: Limits::WORKER_MIN_PAGE_WAIT_MS,
        headless: true,
        profile_dir: None::<PathBuf>,
    }
}

/// Distinct, already-normalized http(s) URLs.
pub fn arb_urls(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("https://[a-z]{1,6}\\.test/[a-z0-9]{0,5}", 1..=max)
        .prop_map(|set| set.into_iter().collect())
}
