// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pull-based status polling with adaptive intervals.
//!
//! Every tick issues one status request. The next delay depends on the
//! outcome: short while a run is active, long while idle, and moderately
//! longer after a failure. Consecutive failures are reported once; the
//! next success re-enables reporting.

use std::time::Duration;

use async_trait::async_trait;
use sweep_core::StateRecord;

use crate::client::ClientError;

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<StateRecord, ClientError>;
}

/// Poll intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub running: Duration,
    pub idle: Duration,
    pub failed_running: Duration,
    pub failed_idle: Duration,
    /// First poll after a `start` or `stop` command.
    pub rearm: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            running: Duration::from_millis(2000),
            idle: Duration::from_millis(5000),
            failed_running: Duration::from_millis(2500),
            failed_idle: Duration::from_millis(5000),
            rearm: Duration::from_millis(900),
        }
    }
}

impl PollSchedule {
    pub fn after_success(&self, state: &StateRecord) -> Duration {
        if state.running {
            self.running
        } else {
            self.idle
        }
    }

    /// `was_running` is the last successfully observed run status.
    pub fn after_failure(&self, was_running: bool) -> Duration {
        if was_running {
            self.failed_running
        } else {
            self.failed_idle
        }
    }
}

/// What a tick has to report.
#[derive(Debug)]
pub enum PollEvent {
    Status(StateRecord),
    /// First failure of a streak.
    Failed(ClientError),
}

pub struct Poller<S> {
    source: S,
    schedule: PollSchedule,
    last_running: bool,
    failing: bool,
}

impl<S: StatusSource> Poller<S> {
    pub fn new(source: S, schedule: PollSchedule) -> Self {
        Self { source, schedule, last_running: false, failing: false }
    }

    pub fn schedule(&self) -> &PollSchedule {
        &self.schedule
    }

    /// Poll once. Returns the event to report, if any, and the delay before
    /// the next tick.
    pub async fn tick(&mut self) -> (Option<PollEvent>, Duration) {
        match self.source.fetch_status().await {
            Ok(state) => {
                self.failing = false;
                self.last_running = state.running;
                let next = self.schedule.after_success(&state);
                (Some(PollEvent::Status(state)), next)
            }
            Err(err) => {
                let next = self.schedule.after_failure(self.last_running);
                if self.failing {
                    return (None, next);
                }
                self.failing = true;
                (Some(PollEvent::Failed(err)), next)
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
