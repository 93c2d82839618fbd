// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stop command handler

use anyhow::Result;

use crate::client::ControlClient;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, render_state, OutputFormat};

pub async fn handle(client: &ControlClient, watch: bool, format: OutputFormat) -> Result<()> {
    let state = client.stop().await.map_err(ExitError::from)?;
    format_or_json(format, &state, || {
        if state.running {
            println!("Stop requested; the worker exits at its next checkpoint");
        } else {
            println!("No scan is running");
        }
        println!("{}", render_state(&state, 0));
    })?;
    if watch {
        let rearm = crate::poller::PollSchedule::default().rearm;
        crate::commands::watch::run(client.clone(), format, rearm).await?;
    }
    Ok(())
}
