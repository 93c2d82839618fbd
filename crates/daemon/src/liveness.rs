// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy healing of stale `running` state.
//!
//! Runs on every status read, so a dead worker is noticed on the first poll
//! after it dies without any background sweep.

use std::sync::Arc;
use std::time::Duration;

use sweep_adapters::ProcessProbe;
use sweep_core::{parse_timestamp, Clock, LogLevel, StateRecord};
use sweep_storage::{StateStore, StoreError};

pub const MSG_DIED: &str = "worker finished unexpectedly";
pub const MSG_NO_PID: &str = "worker did not report a process id";

pub struct LivenessMonitor<C: Clock> {
    probe: Arc<dyn ProcessProbe>,
    clock: C,
    pid_timeout: Duration,
}

impl<C: Clock> LivenessMonitor<C> {
    pub fn new(probe: Arc<dyn ProcessProbe>, clock: C, pid_timeout: Duration) -> Self {
        Self { probe, clock, pid_timeout }
    }

    /// Correct `state` in place if it claims a run that cannot be live.
    /// Returns the reason when a correction was made.
    pub fn check(&self, state: &mut StateRecord) -> Option<&'static str> {
        if !state.running {
            return None;
        }
        let reason = if state.pid > 0 {
            if self.probe.is_alive(state.pid) {
                return None;
            }
            MSG_DIED
        } else {
            let started = parse_timestamp(&state.started_at)?;
            let age = self.clock.now().signed_duration_since(started);
            if age.to_std().map_or(true, |age| age <= self.pid_timeout) {
                return None;
            }
            MSG_NO_PID
        };

        let now = self.clock.stamp();
        state.running = false;
        state.message = reason.to_string();
        state.updated_at = now.clone();
        state.push_log(&now, LogLevel::Warn, reason);
        Some(reason)
    }

    /// Load, correct if stale, persist only if corrected.
    pub fn reconcile(&self, store: &StateStore) -> Result<StateRecord, StoreError> {
        let mut state = store.load();
        if let Some(reason) = self.check(&mut state) {
            tracing::warn!(pid = state.pid, job_id = %state.job_id, reason, "reconciled stale worker state");
            store.save(&state)?;
        }
        Ok(state)
    }
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
