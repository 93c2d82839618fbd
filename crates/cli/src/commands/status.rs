// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command handler

use anyhow::Result;

use crate::client::ControlClient;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, render_state, OutputFormat};

pub async fn handle(client: &ControlClient, logs: usize, format: OutputFormat) -> Result<()> {
    let state = client.status().await.map_err(ExitError::from)?;
    format_or_json(format, &state, || println!("{}", render_state(&state, logs)))
}
