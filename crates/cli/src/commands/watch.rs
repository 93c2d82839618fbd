// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch command: run the status poller until Ctrl-C.

use std::time::Duration;

use anyhow::Result;
use sweep_core::LogEntry;

use crate::client::ControlClient;
use crate::output::{log_line, summary_line, unseen_logs, OutputFormat};
use crate::poller::{PollEvent, PollSchedule, Poller};

/// Poll forever, starting after `first_delay`. Text mode prints a summary
/// whenever it changes plus each new log entry; JSON mode prints one
/// compact state document per successful poll.
pub async fn run(client: ControlClient, format: OutputFormat, first_delay: Duration) -> Result<()> {
    let mut poller = Poller::new(client, PollSchedule::default());
    let mut delay = first_delay;
    let mut last_summary = String::new();
    let mut last_seen: Option<LogEntry> = None;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = &mut ctrl_c => break,
        }
        let (event, next) = poller.tick().await;
        delay = next;

        match event {
            Some(PollEvent::Status(state)) => match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&state)?),
                OutputFormat::Text => {
                    for entry in unseen_logs(&state, last_seen.as_ref()) {
                        println!("{}", log_line(entry));
                    }
                    last_seen = state.logs.first().cloned();
                    let summary = summary_line(&state);
                    if summary != last_summary {
                        println!("== {summary}");
                        last_summary = summary;
                    }
                }
            },
            Some(PollEvent::Failed(err)) => eprintln!("status poll failed: {err}"),
            None => {}
        }
    }
    Ok(())
}

pub async fn handle(client: &ControlClient, format: OutputFormat) -> Result<()> {
    run(client.clone(), format, Duration::ZERO).await
}
