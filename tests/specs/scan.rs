// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan specs: a started job runs through a worker to the state file.

use std::time::Duration;

use crate::prelude::*;

const A: &str = "https://a.test/x";
const B: &str = "https://b.test/y";

fn two_pages() -> FakePageFetcher {
    FakePageFetcher::new().page(A, "<html><body>Status: OK</body></html>").page(B, "<p>nothing yet</p>")
}

#[tokio::test(start_paused = true)]
async fn one_pass_removes_matching_url_and_keeps_the_rest() {
    let s = Scenario::with_pages(two_pages());
    s.orchestrator.start(&start_request(&[A, B], &["OK"])).await.unwrap();

    let state = s.wait_for(Duration::from_secs(60), |st| st.scan_count >= 2).await;

    assert!(state.running);
    assert_eq!(state.pending_urls, vec![B]);
    assert_eq!(state.removed_count, 1);
    assert_eq!(state.total_count, 2);
    assert!(state.queue_consistent());
    assert!(find_log(&state, LogLevel::Ok, "a.test/x").is_some(), "{:#?}", state.logs);
    assert!(find_log(&state, LogLevel::Warn, "b.test/y").is_some(), "{:#?}", state.logs);

    let mirror = QueueMirrorStore::new(&s.paths.queue).load().unwrap();
    assert_eq!(mirror.pending_urls, vec![B]);
}

#[tokio::test(start_paused = true)]
async fn queue_invariant_holds_at_every_observation() {
    let pages = FakePageFetcher::new()
        .page("https://a.test/1", "hit")
        .page("https://a.test/2", "miss")
        .page("https://a.test/3", "hit")
        .page("https://a.test/4", "miss");
    let s = Scenario::with_pages(pages);
    s.orchestrator
        .start(&start_request(&["https://a.test/1", "https://a.test/2", "https://a.test/3", "https://a.test/4"], &["hit"]))
        .await
        .unwrap();

    let mut removed = 0;
    for _ in 0..80 {
        let state = s.orchestrator.status().unwrap();
        assert!(state.queue_consistent(), "{state:#?}");
        assert!(state.removed_count >= removed, "removed_count went backwards");
        removed = state.removed_count;
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    assert_eq!(removed, 2);
}

#[tokio::test(start_paused = true)]
async fn all_matches_complete_the_run() {
    let pages = FakePageFetcher::new().page(A, "OK").page(B, "ok!");
    let s = Scenario::with_pages(pages);
    s.orchestrator.start(&start_request(&[A, B], &["ok"])).await.unwrap();

    let state = s.wait_for(Duration::from_secs(60), |st| !st.running).await;

    assert_eq!(state.message, "completed");
    assert!(state.pending_urls.is_empty());
    assert_eq!(state.removed_count, 2);
    assert!(!state.finished_at.is_empty());
    assert!(find_log(&state, LogLevel::Ok, "queue completed").is_some());
}

#[tokio::test(start_paused = true)]
async fn stop_ends_the_run_cooperatively() {
    let s = Scenario::with_pages(two_pages());
    s.orchestrator.start(&start_request(&[A, B], &["never-there"])).await.unwrap();
    s.wait_for(Duration::from_secs(60), |st| st.scan_count >= 1).await;

    let requested = s.orchestrator.stop().unwrap();
    assert!(requested.stop_requested);

    // One fetch, one page wait and one delay at most; all are short here.
    let state = s.wait_for(Duration::from_secs(30), |st| !st.running).await;

    assert_eq!(state.message, "stopped");
    assert!(state.stop_requested);
    assert_eq!(state.pending_urls.len(), 2, "nothing matched");
    assert!(find_log(&state, LogLevel::Warn, "stopped by user request").is_some());
    assert!(s.paths.stop.exists(), "the worker never deletes the flag");
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_clears_flag_and_runs_again() {
    let s = Scenario::with_pages(two_pages());
    let first = s.orchestrator.start(&start_request(&[A], &["absent"])).await.unwrap();
    s.orchestrator.stop().unwrap();
    s.wait_for(Duration::from_secs(30), |st| !st.running).await;

    let second = s.orchestrator.start(&start_request(&[B], &["absent"])).await.unwrap();

    assert_ne!(first.job_id, second.job_id);
    assert!(!s.paths.stop.exists());
    assert_eq!(s.launcher.spawned().len(), 2);
    let state = s.wait_for(Duration::from_secs(30), |st| st.scan_count >= 1).await;
    assert_eq!(state.pending_urls, vec![B]);
}

#[tokio::test(start_paused = true)]
async fn dead_worker_is_healed_on_the_next_status() {
    let s = Scenario::inert();
    s.orchestrator.start(&start_request(&[A], &["OK"])).await.unwrap();
    assert!(s.state_file().running);

    s.probe.kill(WORKER_PID);
    let state = s.orchestrator.status().unwrap();

    assert!(!state.running);
    assert_eq!(state.message, "worker finished unexpectedly");
    assert!(!s.state_file().running, "correction persisted");
}
