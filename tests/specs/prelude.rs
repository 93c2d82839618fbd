// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for specs.

use std::sync::Arc;
use std::time::Duration;

pub use sweep_adapters::{FakeLauncher, FakePageFetcher, FakeProbe, FakeSessionStore};
pub use sweep_core::{FakeClock, LogLevel, StateRecord};
pub use sweep_daemon::{FixedLocator, Orchestrator, OrchestratorError};
pub use sweep_storage::{JobStore, QueueMirrorStore, RuntimePaths, StateStore, StopFlag};
pub use sweep_wire::{ListInput, NumberInput, StartRequest};

use sweep_engine::{FixedRuntime, ScanWorker, WorkerFiles};

/// Pid every in-process worker reports.
pub const WORKER_PID: u32 = 4242;

/// A state directory plus an orchestrator whose "spawned" worker runs as a
/// tokio task over `pages`.
pub struct Scenario {
    _dir: tempfile::TempDir,
    pub paths: RuntimePaths,
    pub launcher: FakeLauncher,
    pub probe: FakeProbe,
    pub orchestrator: Arc<Orchestrator<FakeClock>>,
}

impl Scenario {
    /// Launches run a real scan worker against `pages`.
    pub fn with_pages(pages: FakePageFetcher) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = RuntimePaths::under(dir.path());
        let probe = FakeProbe::new().alive(WORKER_PID);
        let launcher = FakeLauncher::new().with_pid(Some(WORKER_PID)).on_spawn({
            let paths = paths.clone();
            let probe = probe.clone();
            move |_spec| {
                let worker = ScanWorker::new(
                    WorkerFiles::new(&paths.job, &paths.state, &paths.queue),
                    Arc::new(StopFlag::new(&paths.stop)),
                    Arc::new(FixedRuntime::new(pages.clone())),
                    Arc::new(FakeSessionStore::new()),
                    FakeClock::new(),
                    WORKER_PID,
                );
                let probe = probe.clone();
                tokio::spawn(async move {
                    let _ = worker.run().await;
                    probe.kill(WORKER_PID);
                });
            }
        });
        Self::build(dir, paths, launcher, probe)
    }

    /// Launches are recorded but no worker runs; the pid stays "alive".
    pub fn inert() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = RuntimePaths::under(dir.path());
        let probe = FakeProbe::new().alive(WORKER_PID);
        let launcher = FakeLauncher::new().with_pid(Some(WORKER_PID));
        Self::build(dir, paths, launcher, probe)
    }

    fn build(dir: tempfile::TempDir, paths: RuntimePaths, launcher: FakeLauncher, probe: FakeProbe) -> Self {
        let orchestrator = Orchestrator::new(
            paths.clone(),
            Arc::new(launcher.clone()),
            Arc::new(probe.clone()),
            Arc::new(FixedLocator::found("/usr/libexec/sweep-worker")),
            FakeClock::new(),
        )
        .with_spawn_grace(Duration::from_millis(50));
        Self { _dir: dir, paths, launcher, probe, orchestrator: Arc::new(orchestrator) }
    }

    pub fn state_file(&self) -> StateRecord {
        StateStore::new(&self.paths.state).load()
    }

    /// Poll `status` every 100ms until `done` holds, up to `limit`.
    pub async fn wait_for(&self, limit: Duration, done: impl Fn(&StateRecord) -> bool) -> StateRecord {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            let state = self.orchestrator.status().unwrap();
            if done(&state) {
                return state;
            }
            assert!(tokio::time::Instant::now() < deadline, "timed out; last state: {state:#?}");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}

/// A start request with the shortest allowed timings.
pub fn start_request(urls: &[&str], keywords: &[&str]) -> StartRequest {
    StartRequest {
        urls: ListInput::of(urls.iter().copied()),
        keywords: ListInput::of(keywords.iter().copied()),
        delay_ms: NumberInput::Int(1000),
        page_wait_ms: NumberInput::Int(1000),
        ..StartRequest::default()
    }
}

/// Index of the newest log entry at `level` whose message contains `needle`.
pub fn find_log(state: &StateRecord, level: LogLevel, needle: &str) -> Option<usize> {
    state.logs.iter().position(|e| e.level == level && e.message.contains(needle))
}
