// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use crate::client::ClientError;

/// Daemon unreachable or not answering HTTP.
pub const EXIT_UNREACHABLE: i32 = 3;
/// A scan is already running.
pub const EXIT_CONFLICT: i32 = 4;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<ClientError> for ExitError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Unreachable { .. } => EXIT_UNREACHABLE,
            ClientError::Rejected { status: 409, .. } => EXIT_CONFLICT,
            _ => 1,
        };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
