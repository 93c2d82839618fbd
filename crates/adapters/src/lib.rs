// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the capabilities the core consumes but does not own:
//! page fetching, session persistence, process creation and liveness.

pub mod fetch;
pub mod process;
pub mod session;

pub use fetch::{
    find_system_browser, BrowserPageFetcher, HttpPageFetcher, LaunchOptions, PageFetcher,
    PageOutcome, RuntimeError,
};
pub use process::{
    LaunchError, LaunchSpec, Launched, ProcessLauncher, ProcessProbe, StrategyLauncher,
    SystemProbe,
};
pub use session::{FileSessionStore, SessionError, SessionStore};

#[cfg(any(test, feature = "test-support"))]
pub use fetch::FakePageFetcher;
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeLauncher, FakeProbe};
#[cfg(any(test, feature = "test-support"))]
pub use session::FakeSessionStore;
