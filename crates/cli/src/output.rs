// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use sweep_core::{LogEntry, StateRecord};

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format-branch helper for non-list commands.
///
/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}

/// One line: message, run flag and queue progress.
pub fn summary_line(state: &StateRecord) -> String {
    let run = if state.running {
        match state.pid {
            0 => "running".to_string(),
            pid => format!("running, pid {pid}"),
        }
    } else {
        "idle".to_string()
    };
    let mut line = format!(
        "{} ({run}) pending {}/{} removed {} lap {} scans {}",
        state.message,
        state.pending_count,
        state.total_count,
        state.removed_count,
        state.lap_count,
        state.scan_count,
    );
    if state.stop_requested && state.running {
        line.push_str(" [stopping]");
    }
    line
}

pub fn log_line(entry: &LogEntry) -> String {
    format!("{} {} {}", color::muted(&entry.time), color::level(entry.level), entry.message)
}

/// Multi-line status block with up to `max_logs` recent log entries,
/// oldest first.
pub fn render_state(state: &StateRecord, max_logs: usize) -> String {
    let mut out = Vec::new();
    out.push(format!("{} {}", color::header("Status:"), summary_line(state)));
    if !state.job_id.is_empty() {
        out.push(format!("{} {}", color::header("Job:"), state.job_id));
    }
    if !state.current_url.is_empty() {
        out.push(format!("{} {}", color::header("Current:"), state.current_url));
    }
    if !state.keywords.is_empty() {
        out.push(format!("{} {}", color::header("Keywords:"), state.keywords.join(", ")));
    }
    if !state.started_at.is_empty() {
        out.push(format!("{} {}", color::header("Started:"), state.started_at));
    }
    if !state.finished_at.is_empty() {
        out.push(format!("{} {}", color::header("Finished:"), state.finished_at));
    }
    if max_logs > 0 && !state.logs.is_empty() {
        out.push(String::new());
        out.extend(state.logs.iter().take(max_logs).rev().map(log_line));
    }
    out.join("\n")
}

/// Entries newer than `seen`, oldest first.
///
/// The log is a newest-first ring; entries are matched by value, so when
/// `seen` has been evicted the whole buffer is treated as new.
pub fn unseen_logs<'a>(state: &'a StateRecord, seen: Option<&LogEntry>) -> Vec<&'a LogEntry> {
    let fresh = match seen {
        Some(seen) => state.logs.iter().position(|e| e == seen).unwrap_or(state.logs.len()),
        None => state.logs.len(),
    };
    state.logs[..fresh].iter().rev().collect()
}
