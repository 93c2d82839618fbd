// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed artifacts shared between the control plane and the worker.
//!
//! Every JSON artifact is rewritten wholesale on each save. There is no
//! merge and no version check: across processes the last writer wins.

mod json_file;
mod paths;
mod queue_mirror;
mod state_store;
mod stop_flag;

pub use json_file::{read_json, write_json_atomic, StoreError};
pub use paths::RuntimePaths;
pub use queue_mirror::QueueMirrorStore;
pub use state_store::{JobStore, StateStore};
pub use stop_flag::StopFlag;
