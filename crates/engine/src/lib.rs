// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sweep-engine: the scan worker.
//!
//! Loads a job, walks the pending queue fetching each URL, removes URLs whose
//! page mentions a keyword, and persists progress after every step until the
//! queue drains, a stop is requested, or something fatal happens.

pub mod env;
mod error;
mod matcher;
mod runtime;
mod worker;

pub use error::WorkerError;
pub use matcher::{find_keyword, short_url};
pub use runtime::{Acquired, RuntimeChain, RuntimeProvider};
pub use worker::{Finish, ScanWorker, WorkerFiles};

#[cfg(any(test, feature = "test-support"))]
pub use runtime::FixedRuntime;
