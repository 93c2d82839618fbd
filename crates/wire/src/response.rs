// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use sweep_core::StateRecord;

/// Body of every control-plane reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(state: StateRecord) -> Self {
        Self { ok: true, state: Some(state), error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { ok: false, state: None, error: Some(message.into()) }
    }

    pub fn with_state(mut self, state: StateRecord) -> Self {
        self.state = Some(state);
        self
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
