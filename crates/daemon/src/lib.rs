// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sweep daemon: the control plane.
//!
//! Validates and starts scan jobs, spawns the detached worker, reconciles
//! stale liveness on every status read, and serves all of it over HTTP.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;
pub mod liveness;
pub mod orchestrator;

pub use lifecycle::{startup, Config, DaemonLock, LifecycleError};
pub use listener::router;
pub use liveness::LivenessMonitor;
pub use orchestrator::{BinaryLocator, Orchestrator, OrchestratorError, WorkerLocator};

#[cfg(any(test, feature = "test-support"))]
pub use orchestrator::FixedLocator;
