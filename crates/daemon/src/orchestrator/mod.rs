// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job orchestration: start, stop, status.
//!
//! `start` is serialized twice over: an in-process async mutex covers
//! concurrent requests to this daemon, and an exclusive lock on `start.lock`
//! covers a second daemon sharing the state directory. The reconciled
//! `running` flag is checked while both are held, so two starts cannot both
//! spawn a worker.

mod locator;

pub use locator::{verify, BinaryLocator, WorkerLocator, WORKER_NAME};

#[cfg(any(test, feature = "test-support"))]
pub use locator::FixedLocator;

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use fs2::FileExt;
use sweep_adapters::{LaunchError, LaunchSpec, ProcessLauncher, ProcessProbe};
use sweep_core::{
    clamp_ms, normalize_keywords, normalize_urls, Clock, JobDescriptor, JobId, Limits, LogLevel,
    QueueMirror, StateRecord,
};
use sweep_storage::{JobStore, QueueMirrorStore, RuntimePaths, StateStore, StopFlag, StoreError};
use sweep_wire::StartRequest;
use thiserror::Error;

use crate::liveness::LivenessMonitor;

const DEFAULT_PID_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Bad or empty input; nothing was written.
    #[error("{0}")]
    Validation(String),

    /// A run is already active; nothing was written.
    #[error("a scan is already running")]
    Conflict { state: Box<StateRecord> },

    /// No usable worker executable; recorded in state before returning.
    #[error("automation runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// Process creation failed; recorded in state before returning.
    #[error("worker could not be started: {0}")]
    Spawn(#[source] LaunchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("start lock: {0}")]
    Lock(#[source] std::io::Error),
}

pub struct Orchestrator<C: Clock> {
    paths: RuntimePaths,
    state: StateStore,
    job: JobStore,
    queue: QueueMirrorStore,
    stop: StopFlag,
    launcher: Arc<dyn ProcessLauncher>,
    probe: Arc<dyn ProcessProbe>,
    locator: Arc<dyn WorkerLocator>,
    liveness: LivenessMonitor<C>,
    clock: C,
    spawn_grace: Duration,
    start_gate: tokio::sync::Mutex<()>,
}

impl<C: Clock> Orchestrator<C> {
    pub fn new(
        paths: RuntimePaths,
        launcher: Arc<dyn ProcessLauncher>,
        probe: Arc<dyn ProcessProbe>,
        locator: Arc<dyn WorkerLocator>,
        clock: C,
    ) -> Self {
        Self {
            state: StateStore::new(&paths.state),
            job: JobStore::new(&paths.job),
            queue: QueueMirrorStore::new(&paths.queue),
            stop: StopFlag::new(&paths.stop),
            liveness: LivenessMonitor::new(probe.clone(), clock.clone(), DEFAULT_PID_TIMEOUT),
            paths,
            launcher,
            probe,
            locator,
            clock,
            spawn_grace: Duration::from_secs(1),
            start_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn with_spawn_grace(mut self, grace: Duration) -> Self {
        self.spawn_grace = grace;
        self
    }

    pub fn with_pid_timeout(mut self, timeout: Duration) -> Self {
        self.liveness = LivenessMonitor::new(self.probe.clone(), self.clock.clone(), timeout);
        self
    }

    pub fn paths(&self) -> &RuntimePaths {
        &self.paths
    }

    /// Current state after liveness reconciliation.
    pub fn status(&self) -> Result<StateRecord, OrchestratorError> {
        Ok(self.liveness.reconcile(&self.state)?)
    }

    /// Request cooperative cancellation. Idempotent; does not wait.
    pub fn stop(&self) -> Result<StateRecord, OrchestratorError> {
        let now = self.clock.stamp();
        self.stop.raise(&now)?;

        let mut state = self.state.load();
        if state.running && state.pid > 0 {
            state.stop_requested = true;
            state.message = "stop requested".to_string();
            state.updated_at = now;
            self.state.save(&state)?;
        }
        tracing::info!(pid = state.pid, job_id = %state.job_id, "stop requested");
        self.status()
    }

    /// Validate, bootstrap and spawn a worker for a new job.
    pub async fn start(&self, request: &StartRequest) -> Result<StateRecord, OrchestratorError> {
        let _gate = self.start_gate.lock().await;
        let _lock = self.lock_start()?;

        let current = self.status()?;
        if current.running {
            return Err(OrchestratorError::Conflict { state: Box::new(current) });
        }

        let job = self.build_job(request)?;
        self.stop.clear()?;
        self.job.write(&job)?;
        let bootstrap = StateRecord::bootstrap(&job, &job.created_at);
        self.state.save(&bootstrap)?;
        self.queue.save(&QueueMirror::of(&bootstrap, &job.created_at))?;
        tracing::info!(job_id = %job.job_id, urls = job.urls.len(), keywords = job.keywords.len(), "job written");

        let worker = match self.locator.locate().await {
            Ok(worker) => worker,
            Err(reason) => {
                tracing::error!(%reason, "no usable worker runtime");
                self.roll_back(
                    "automation runtime unavailable",
                    &format!("automation runtime unavailable: {reason}"),
                )?;
                return Err(OrchestratorError::RuntimeUnavailable(reason));
            }
        };

        let spec = LaunchSpec::new(&worker)
            .arg("--job")
            .arg(&self.paths.job)
            .arg("--state")
            .arg(&self.paths.state)
            .arg("--queue")
            .arg(&self.paths.queue)
            .arg("--stop")
            .arg(&self.paths.stop)
            .log_to(&self.paths.worker_log);
        let launched = match self.launcher.spawn(&spec).await {
            Ok(launched) => launched,
            Err(e) => {
                tracing::error!(error = %e, "worker spawn failed");
                self.roll_back("worker could not be started", &format!("worker could not be started: {e}"))?;
                return Err(OrchestratorError::Spawn(e));
            }
        };

        if let Some(pid) = launched.pid {
            self.record_pid(pid);
        }
        tracing::info!(job_id = %job.job_id, pid = ?launched.pid, strategy = launched.strategy, "worker spawned");

        tokio::time::sleep(self.spawn_grace).await;
        self.status()
    }

    fn lock_start(&self) -> Result<File, OrchestratorError> {
        if let Some(parent) = self.paths.start_lock.parent() {
            std::fs::create_dir_all(parent).map_err(OrchestratorError::Lock)?;
        }
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.paths.start_lock)
            .map_err(OrchestratorError::Lock)?;
        if file.try_lock_exclusive().is_err() {
            let state = self.state.load();
            return Err(OrchestratorError::Conflict { state: Box::new(state) });
        }
        Ok(file)
    }

    fn build_job(&self, request: &StartRequest) -> Result<JobDescriptor, OrchestratorError> {
        let urls = normalize_urls(request.url_items());
        if urls.is_empty() {
            return Err(OrchestratorError::Validation("no valid URLs to process".to_string()));
        }
        let keywords = normalize_keywords(request.keyword_items());
        if keywords.is_empty() {
            return Err(OrchestratorError::Validation("no valid keywords".to_string()));
        }

        Ok(JobDescriptor {
            job_id: JobId::generate(),
            created_at: self.clock.stamp(),
            urls,
            keywords,
            delay_ms: clamp_ms(
                request.delay_ms.value(),
                Limits::DEFAULT_DELAY_MS,
                Limits::MIN_DELAY_MS,
                Limits::MAX_DELAY_MS,
            ),
            page_wait_ms: clamp_ms(
                request.page_wait_ms.value(),
                Limits::DEFAULT_PAGE_WAIT_MS,
                Limits::MIN_PAGE_WAIT_MS,
                Limits::MAX_PAGE_WAIT_MS,
            ),
            headless: request.headless.value(),
            profile_dir: Some(self.paths.profile_dir.clone()),
        })
    }

    /// Mark the bootstrapped run as not running, with an explanatory log.
    fn roll_back(&self, message: &str, detail: &str) -> Result<(), OrchestratorError> {
        let now = self.clock.stamp();
        let mut state = self.state.load();
        state.running = false;
        state.message = message.to_string();
        state.updated_at = now.clone();
        state.push_log(&now, LogLevel::Err, detail);
        self.state.save(&state)?;
        Ok(())
    }

    /// Best-effort: the worker also writes its own pid once it starts.
    fn record_pid(&self, pid: u32) {
        let mut state = self.state.load();
        if state.pid == 0 {
            state.pid = pid;
            state.updated_at = self.clock.stamp();
            if let Err(e) = self.state.save(&state) {
                tracing::warn!(pid, error = %e, "failed to record worker pid");
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
