// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redundant snapshot of the pending queue for consumers that only need the
//! live URL list. Derived from [`StateRecord`]; carries no authority of its own.

use serde::{Deserialize, Serialize};

use crate::state::StateRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueMirror {
    pub pending_urls: Vec<String>,
    pub updated_at: String,
}

impl QueueMirror {
    pub fn of(state: &StateRecord, now: &str) -> Self {
        Self { pending_urls: state.pending_urls.clone(), updated_at: now.to_string() }
    }
}
