// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_fields_take_defaults() {
    let job: JobDescriptor = serde_json::from_str(r#"{"job_id":"job-1"}"#).unwrap();
    assert_eq!(job.delay_ms, Limits::DEFAULT_DELAY_MS);
    assert_eq!(job.page_wait_ms, Limits::DEFAULT_PAGE_WAIT_MS);
    assert!(job.urls.is_empty());
    assert!(!job.headless);
    assert!(job.profile_dir.is_none());
}

#[test]
fn worker_normalization_uses_looser_page_wait_bounds() {
    let job = JobDescriptor {
        job_id: JobId::from("job-1"),
        created_at: String::new(),
        urls: vec![" https://a.test/x ".into(), "https://a.test/x".into(), "ftp://b".into()],
        keywords: vec!["OK".into(), "ok".into()],
        delay_ms: 10,
        page_wait_ms: 600,
        headless: true,
        profile_dir: Some(PathBuf::new()),
    }
    .normalized_for_worker();

    assert_eq!(job.urls, vec!["https://a.test/x"]);
    assert_eq!(job.keywords, vec!["OK"]);
    assert_eq!(job.delay_ms, Limits::MIN_DELAY_MS);
    assert_eq!(job.page_wait_ms, 600);
    assert!(job.profile_dir.is_none(), "empty profile dir means none");
}

#[test]
fn page_wait_is_capped_at_worker_max() {
    let job: JobDescriptor =
        serde_json::from_str(r#"{"job_id":"job-1","page_wait_ms":999999}"#).unwrap();
    assert_eq!(job.normalized_for_worker().page_wait_ms, Limits::WORKER_MAX_PAGE_WAIT_MS);
}
