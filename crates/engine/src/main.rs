// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sweep-worker: one scan run, driven entirely by files on disk.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sweep_adapters::FileSessionStore;
use sweep_core::SystemClock;
use sweep_engine::{RuntimeChain, ScanWorker, WorkerFiles};
use sweep_storage::StopFlag;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sweep-worker", version, about = "Scan a URL queue for keywords")]
struct Args {
    /// Job descriptor to run
    #[arg(long)]
    job: PathBuf,
    /// Shared state record
    #[arg(long)]
    state: PathBuf,
    /// Queue mirror
    #[arg(long)]
    queue: PathBuf,
    /// Stop flag; its presence requests cancellation
    #[arg(long)]
    stop: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // clap exits with code 2 on missing arguments
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(sweep_engine::env::log_filter()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let pid = std::process::id();
    tracing::info!(pid, job = %args.job.display(), "sweep-worker starting");

    let worker = ScanWorker::new(
        WorkerFiles::new(args.job, args.state, args.queue),
        Arc::new(StopFlag::new(args.stop)),
        Arc::new(RuntimeChain::from_env()),
        Arc::new(FileSessionStore),
        SystemClock,
        pid,
    );
    worker.run().await?;
    Ok(())
}
