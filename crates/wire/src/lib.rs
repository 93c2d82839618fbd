// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-plane request and response bodies.
//!
//! `POST /automation` takes a JSON object with an `action` field; every
//! reply is `{ ok, state?, error? }`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;

pub use request::{ControlRequest, FlagInput, ListInput, NumberInput, StartRequest, WireError};
pub use response::ApiResponse;

/// Path of the control endpoint.
pub const AUTOMATION_PATH: &str = "/automation";
