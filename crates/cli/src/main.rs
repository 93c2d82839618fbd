// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sweep: command-line client for the sweep daemon.

mod client;
mod color;
mod commands;
mod env;
mod exit_error;
mod output;
mod poller;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::client::ControlClient;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SWEEP_BUILD_HASH"), ")");

#[derive(Parser)]
#[command(
    name = "sweep",
    version = VERSION,
    about = "Watch a list of web pages for keywords",
    styles = color::styles(),
)]
struct Cli {
    /// Daemon base URL [default: $SWEEP_URL or http://127.0.0.1:7878]
    #[arg(long, global = true, value_name = "URL")]
    daemon: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a scan job
    Start(commands::start::StartArgs),
    /// Ask the running worker to stop
    Stop {
        /// Keep polling status afterwards
        #[arg(long)]
        watch: bool,
    },
    /// Show the current run status
    Status {
        /// Number of recent log entries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        logs: usize,
    },
    /// Poll status until interrupted
    Watch,
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let base = cli.daemon.unwrap_or_else(env::base_url);
    let client = ControlClient::new(&base).map_err(|e| ExitError::new(2, e.to_string()))?;
    let format = cli.output;

    match command {
        Commands::Start(args) => commands::start::handle(&client, &args, format).await,
        Commands::Stop { watch } => commands::stop::handle(&client, watch, format).await,
        Commands::Status { logs } => commands::status::handle(&client, logs, format).await,
        Commands::Watch => commands::watch::handle(&client, format).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        if let Some(exit) = err.downcast_ref::<ExitError>() {
            eprintln!("Error: {}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
