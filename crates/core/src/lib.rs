// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sweep-core: shared records and rules for the sweep control plane and worker

pub mod cancel;
pub mod clock;
pub mod id;
pub mod job;
pub mod normalize;
pub mod queue;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cancel::{CancelSignal, CancelToken};
pub use clock::{parse_timestamp, timestamp, Clock, FakeClock, SystemClock};
pub use id::JobId;
pub use job::{JobDescriptor, Limits};
pub use normalize::{clamp_ms, normalize_keywords, normalize_urls, truncate_chars};
pub use queue::QueueMirror;
pub use state::{LogEntry, LogLevel, StateRecord, MAX_LOGS};
