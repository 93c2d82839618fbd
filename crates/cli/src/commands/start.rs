// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start command handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sweep_wire::{FlagInput, ListInput, NumberInput, StartRequest};

use crate::client::{ClientError, ControlClient};
use crate::exit_error::ExitError;
use crate::output::{format_or_json, render_state, OutputFormat};

#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// URL to watch (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// File with one URL per line
    #[arg(long, value_name = "FILE")]
    pub urls_file: Option<PathBuf>,

    /// Keyword to look for (repeatable; commas and semicolons also split)
    #[arg(long = "keyword", short = 'k', value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Pause after each URL, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<i64>,

    /// Time to let each page settle, in milliseconds
    #[arg(long, value_name = "MS")]
    pub page_wait_ms: Option<i64>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Keep polling status after the run starts
    #[arg(long)]
    pub watch: bool,
}

impl StartArgs {
    /// Raw request; normalization and clamping happen in the daemon.
    pub fn to_request(&self) -> Result<StartRequest> {
        let mut urls = self.urls.clone();
        if let Some(path) = &self.urls_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            urls.extend(text.lines().map(str::to_string));
        }
        let keywords = self
            .keywords
            .iter()
            .flat_map(|k| k.split([',', ';']))
            .map(str::to_string)
            .collect::<Vec<_>>();

        Ok(StartRequest {
            urls: ListInput::of(urls),
            keywords: ListInput::of(keywords),
            delay_ms: self.delay_ms.map_or(NumberInput::Absent, NumberInput::Int),
            page_wait_ms: self.page_wait_ms.map_or(NumberInput::Absent, NumberInput::Int),
            headless: if self.headless { FlagInput::Bool(true) } else { FlagInput::Absent },
        })
    }
}

pub async fn handle(client: &ControlClient, args: &StartArgs, format: OutputFormat) -> Result<()> {
    let request = args.to_request()?;
    match client.start(request).await {
        Ok(state) => {
            format_or_json(format, &state, || {
                println!("Scan started: {} URL(s), {} keyword(s)", state.total_count, state.keywords.len());
                println!("{}", render_state(&state, 0));
            })?;
            if args.watch {
                let schedule = crate::poller::PollSchedule::default();
                crate::commands::watch::run(client.clone(), format, schedule.rearm).await?;
            }
            Ok(())
        }
        Err(ClientError::Rejected { status: 409, message, state: Some(state) }) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                eprintln!("{}", render_state(&state, 0));
            }
            Err(ExitError::new(crate::exit_error::EXIT_CONFLICT, message).into())
        }
        Err(e) => Err(ExitError::from(e).into()),
    }
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
