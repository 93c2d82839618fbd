// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation, polled by the worker at loop boundaries only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A signal the worker checks between units of work. Never preemptive.
pub trait CancelSignal: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// In-process cancellation for a worker that shares memory with its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl CancelSignal for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
