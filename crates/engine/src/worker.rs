// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scan loop.
//!
//! `Starting → Scanning → {Completing | Stopping | Failing} → Finished`
//!
//! While a run is active the worker is the sole writer of the state record.
//! Progress is persisted after every pointer move and every fetch, so a
//! poller reading the state file always sees `pending_count + removed_count
//! == total_count`.

use crate::matcher::{find_keyword, short_url};
use crate::runtime::RuntimeProvider;
use crate::WorkerError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use sweep_adapters::{LaunchOptions, PageFetcher, SessionStore};
use sweep_core::{
    truncate_chars, CancelSignal, Clock, JobDescriptor, LogLevel, QueueMirror, StateRecord,
};
use sweep_storage::{JobStore, QueueMirrorStore, StateStore};

/// Fatal error details in the operator log are cut to this many characters.
const MAX_FAILURE_DETAIL: usize = 2500;

const MSG_SCANNING: &str = "scanning URLs";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Completed,
    Stopped,
    Failed,
}

/// The three JSON artifacts a worker reads and writes.
#[derive(Debug, Clone)]
pub struct WorkerFiles {
    pub job: JobStore,
    pub state: StateStore,
    pub queue: QueueMirrorStore,
}

impl WorkerFiles {
    pub fn new(job: impl Into<PathBuf>, state: impl Into<PathBuf>, queue: impl Into<PathBuf>) -> Self {
        Self {
            job: JobStore::new(job),
            state: StateStore::new(state),
            queue: QueueMirrorStore::new(queue),
        }
    }
}

pub struct ScanWorker<C: Clock> {
    files: WorkerFiles,
    cancel: Arc<dyn CancelSignal>,
    runtime: Arc<dyn RuntimeProvider>,
    sessions: Arc<dyn SessionStore>,
    clock: C,
    pid: u32,
    state: StateRecord,
}

/// Resources acquired during Starting that Finished must release.
#[derive(Default)]
struct Held {
    fetcher: Option<Arc<dyn PageFetcher>>,
    profile_dir: Option<PathBuf>,
}

impl<C: Clock> ScanWorker<C> {
    pub fn new(
        files: WorkerFiles,
        cancel: Arc<dyn CancelSignal>,
        runtime: Arc<dyn RuntimeProvider>,
        sessions: Arc<dyn SessionStore>,
        clock: C,
        pid: u32,
    ) -> Self {
        Self { files, cancel, runtime, sessions, clock, pid, state: StateRecord::default() }
    }

    /// Run to completion. Only a failure of the final state write is an error;
    /// everything else is recorded in the state file.
    pub async fn run(mut self) -> Result<Finish, WorkerError> {
        self.state = self.files.state.load();
        self.state.pid = self.pid;
        let mut held = Held::default();

        let finish = match self.start_and_scan(&mut held).await {
            Ok(finish) => finish,
            Err(e) => {
                self.fail(&e);
                Finish::Failed
            }
        };

        self.finalize(held).await?;
        tracing::info!(job_id = %self.state.job_id, ?finish, "worker finished");
        Ok(finish)
    }

    async fn start_and_scan(&mut self, held: &mut Held) -> Result<Finish, WorkerError> {
        let job = self.load_job()?;
        if job.urls.is_empty() {
            return Err(WorkerError::NoUrls);
        }
        if job.keywords.is_empty() {
            return Err(WorkerError::NoKeywords);
        }
        self.begin(&job)?;

        let fetcher = self.launch(&job, held).await?;
        self.scan(&job, &*fetcher).await
    }

    fn load_job(&mut self) -> Result<JobDescriptor, WorkerError> {
        match self.files.job.load() {
            Ok(Some(job)) => Ok(job.normalized_for_worker()),
            Ok(None) => Err(WorkerError::JobUnreadable("job file is missing or empty".to_string())),
            Err(e) => Err(WorkerError::JobUnreadable(e.to_string())),
        }
    }

    /// Take ownership of the state record for this run.
    fn begin(&mut self, job: &JobDescriptor) -> Result<(), WorkerError> {
        let now = self.clock.stamp();
        let state = &mut self.state;
        state.running = true;
        state.pid = self.pid;
        state.job_id = job.job_id.clone();
        if state.started_at.is_empty() {
            state.started_at = now.clone();
        }
        state.finished_at.clear();
        state.stop_requested = false;
        state.total_count = job.urls.len();
        state.removed_count = 0;
        state.scan_count = 0;
        state.lap_count = 1;
        state.keywords = job.keywords.clone();
        state.current_index = 0;
        state.current_url = job.urls.first().cloned().unwrap_or_default();
        state.set_pending(job.urls.clone());
        state.message = "worker started".to_string();
        state.push_log(&now, LogLevel::Note, format!("worker pid {} started", self.pid));

        tracing::info!(job_id = %job.job_id, pid = self.pid, urls = job.urls.len(), "worker started");
        self.persist_queue()?;
        self.persist()
    }

    async fn launch(
        &mut self,
        job: &JobDescriptor,
        held: &mut Held,
    ) -> Result<Arc<dyn PageFetcher>, WorkerError> {
        let mut options = LaunchOptions {
            headless: job.headless,
            page_wait: Duration::from_millis(job.page_wait_ms),
            profile_dir: job.profile_dir.clone(),
            session: None,
        };
        if let Some(dir) = &job.profile_dir {
            held.profile_dir = Some(dir.clone());
            options.session = self.restore_session(dir);
        }

        let acquired = self.runtime.acquire(&options).await?;
        held.fetcher = Some(Arc::clone(&acquired.fetcher));

        let now = self.clock.stamp();
        tracing::info!(runtime = %acquired.description, "automation runtime ready");
        self.state.push_log(&now, LogLevel::Note, format!("using {}", acquired.description));
        if options.session.is_some() {
            self.state.push_log(&now, LogLevel::Note, "session restored from storage_state.json");
        }
        let mode = if job.headless { "headless" } else { "visible" };
        self.state.push_log(&now, LogLevel::Note, format!("browser started in {mode} mode"));
        self.state.message = MSG_SCANNING.to_string();
        self.persist()?;

        Ok(acquired.fetcher)
    }

    fn restore_session(&self, profile_dir: &Path) -> Option<Vec<u8>> {
        match self.sessions.load(profile_dir) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed");
                None
            }
        }
    }

    async fn scan(
        &mut self,
        job: &JobDescriptor,
        fetcher: &dyn PageFetcher,
    ) -> Result<Finish, WorkerError> {
        let wait = Duration::from_millis(job.page_wait_ms);
        let delay = Duration::from_millis(job.delay_ms);
        let mut index = 0usize;

        loop {
            if self.cancel.is_cancelled() {
                return self.stop();
            }
            if self.state.pending_urls.is_empty() {
                return self.complete();
            }

            if index >= self.state.pending_urls.len() {
                index = 0;
            }
            let url = self.state.pending_urls[index].clone();
            self.state.current_index = index;
            self.state.current_url = url.clone();
            self.persist()?;

            let outcome = fetcher.fetch(&url, wait).await;
            let matched = find_keyword(&outcome.text, &job.keywords).map(str::to_string);
            self.state.scan_count += 1;
            let now = self.clock.stamp();

            match matched {
                Some(keyword) => {
                    self.state.remove_pending(index);
                    tracing::info!(%url, %keyword, "keyword matched, url removed");
                    self.state.push_log(
                        &now,
                        LogLevel::Ok,
                        format!("match \"{keyword}\" in {}, URL removed", short_url(&url)),
                    );
                    self.state.message = "match found, URL removed".to_string();
                    if index >= self.state.pending_urls.len() && !self.state.pending_urls.is_empty() {
                        index = 0;
                        self.state.lap_count += 1;
                    }
                }
                None => {
                    let status = outcome.status.unwrap_or(0);
                    let (level, suffix) = match &outcome.error {
                        Some(error) => (LogLevel::Err, format!(" Error: {error}")),
                        None => (LogLevel::Warn, String::new()),
                    };
                    tracing::debug!(%url, status, error = ?outcome.error, "no match");
                    self.state.push_log(
                        &now,
                        level,
                        format!("no match on {} (HTTP {status}).{suffix}", short_url(&url)),
                    );
                    self.state.message = "scanning, no match".to_string();
                    index = (index + 1) % self.state.pending_urls.len();
                    if index == 0 {
                        self.state.lap_count += 1;
                    }
                }
            }

            if self.state.pending_urls.is_empty() {
                return self.complete();
            }
            self.state.current_index = index;
            self.state.current_url = self.state.pending_urls[index].clone();
            self.persist_queue()?;
            self.persist()?;

            if self.cancel.is_cancelled() {
                return self.stop();
            }
            tokio::time::sleep(delay).await;
        }
    }

    fn complete(&mut self) -> Result<Finish, WorkerError> {
        let now = self.clock.stamp();
        self.state.current_index = 0;
        self.state.current_url.clear();
        self.state.set_pending(Vec::new());
        self.state.push_log(&now, LogLevel::Ok, "queue completed, no URLs remaining");
        self.state.message = "completed".to_string();
        self.persist_queue()?;
        Ok(Finish::Completed)
    }

    fn stop(&mut self) -> Result<Finish, WorkerError> {
        let now = self.clock.stamp();
        self.state.stop_requested = true;
        self.state.push_log(&now, LogLevel::Warn, "stopped by user request");
        self.state.message = "stopped".to_string();
        tracing::info!(job_id = %self.state.job_id, "stop observed");
        Ok(Finish::Stopped)
    }

    fn fail(&mut self, error: &WorkerError) {
        let now = self.clock.stamp();
        let detail = error.to_string();
        tracing::error!(job_id = %self.state.job_id, error = %detail, "worker failed");
        self.state.push_log(
            &now,
            LogLevel::Err,
            format!("worker failed: {}", truncate_chars(&detail, MAX_FAILURE_DETAIL)),
        );
        self.state.message = "worker failed".to_string();
    }

    async fn finalize(&mut self, held: Held) -> Result<(), WorkerError> {
        if let Some(fetcher) = &held.fetcher {
            if let Some(dir) = &held.profile_dir {
                if let Some(blob) = fetcher.export_session().await {
                    if let Err(e) = self.sessions.save(dir, &blob) {
                        tracing::warn!(error = %e, "session save failed");
                    }
                }
            }
            fetcher.close().await;
        }

        let now = self.clock.stamp();
        self.state.running = false;
        self.state.finished_at = now;
        self.state.current_url.clear();
        if self.state.message == MSG_SCANNING {
            self.state.message = "worker finished".to_string();
        }
        self.persist()
    }

    fn persist(&mut self) -> Result<(), WorkerError> {
        self.state.updated_at = self.clock.stamp();
        self.files.state.save(&self.state)?;
        Ok(())
    }

    fn persist_queue(&self) -> Result<(), WorkerError> {
        let mirror = QueueMirror::of(&self.state, &self.clock.stamp());
        self.files.queue.save(&mirror)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
