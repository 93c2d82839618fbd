// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

/// Default control-plane base URL
pub const DEFAULT_URL: &str = "http://127.0.0.1:7878";

/// Control-plane base URL (`SWEEP_URL`)
pub fn base_url() -> String {
    std::env::var("SWEEP_URL").ok().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| DEFAULT_URL.to_string())
}
