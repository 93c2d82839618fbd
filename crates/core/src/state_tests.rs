// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::Limits;
use proptest::prelude::*;

const NOW: &str = "2026-01-01T00:00:00Z";

fn job(urls: &[&str]) -> JobDescriptor {
    JobDescriptor {
        job_id: JobId::from("job-test"),
        created_at: NOW.to_string(),
        urls: urls.iter().map(|u| u.to_string()).collect(),
        keywords: vec!["OK".to_string()],
        delay_ms: Limits::DEFAULT_DELAY_MS,
        page_wait_ms: Limits::DEFAULT_PAGE_WAIT_MS,
        headless: true,
        profile_dir: None,
    }
}

#[test]
fn default_record_is_idle() {
    let state = StateRecord::default();
    assert!(!state.running);
    assert_eq!(state.message, "idle");
    assert_eq!(state.pid, 0);
    assert!(state.queue_consistent());
}

#[test]
fn bootstrap_sets_counts_and_first_log() {
    let state = StateRecord::bootstrap(&job(&["https://a.test/", "https://b.test/"]), NOW);
    assert!(state.running);
    assert_eq!(state.total_count, 2);
    assert_eq!(state.pending_count, 2);
    assert_eq!(state.lap_count, 1);
    assert_eq!(state.logs.len(), 1);
    assert_eq!(state.logs[0].level, LogLevel::Note);
    assert_eq!(state.logs[0].message, "worker starting");
    assert!(state.queue_consistent());
}

#[test]
fn logs_are_newest_first_and_bounded() {
    let mut state = StateRecord::default();
    for i in 0..(MAX_LOGS + 25) {
        state.push_log(NOW, LogLevel::Note, format!("entry {i}"));
    }
    assert_eq!(state.logs.len(), MAX_LOGS);
    assert_eq!(state.logs[0].message, format!("entry {}", MAX_LOGS + 24));
    assert_eq!(state.logs[MAX_LOGS - 1].message, "entry 25");
}

#[test]
fn unknown_fields_are_ignored_and_missing_fields_defaulted() {
    let state: StateRecord =
        serde_json::from_str(r#"{"running":true,"pid":42,"surprise":{"a":1}}"#).unwrap();
    assert!(state.running);
    assert_eq!(state.pid, 42);
    assert_eq!(state.message, "idle");
    assert!(state.logs.is_empty());
}

#[yare::parameterized(
    note = { LogLevel::Note, "\"note\"" },
    ok   = { LogLevel::Ok,   "\"ok\"" },
    warn = { LogLevel::Warn, "\"warn\"" },
    err  = { LogLevel::Err,  "\"err\"" },
)]
fn log_levels_serialize_lowercase(level: LogLevel, json: &str) {
    assert_eq!(serde_json::to_string(&level).unwrap(), json);
    assert_eq!(level.to_string(), json.trim_matches('"'));
}

#[test]
fn remove_pending_out_of_range_is_noop() {
    let mut state = StateRecord::bootstrap(&job(&["https://a.test/"]), NOW);
    assert!(state.remove_pending(3).is_none());
    assert_eq!(state.removed_count, 0);
}

proptest! {
    #[test]
    fn removals_preserve_queue_invariant(
        n in 1usize..40,
        picks in proptest::collection::vec(0usize..50, 0..60),
    ) {
        let urls: Vec<String> = (0..n).map(|i| format!("https://h.test/{i}")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let mut state = StateRecord::bootstrap(&job(&refs), NOW);
        let mut last_removed = 0;
        for pick in picks {
            if state.pending_urls.is_empty() {
                break;
            }
            state.remove_pending(pick % state.pending_urls.len());
            prop_assert!(state.queue_consistent());
            prop_assert!(state.removed_count >= last_removed);
            last_removed = state.removed_count;
        }
    }
}
