// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sweepd: serves the automation control plane on localhost.

use std::sync::Arc;

use anyhow::Context;
use sweep_adapters::{StrategyLauncher, SystemProbe};
use sweep_core::SystemClock;
use sweep_daemon::{env, router, startup, BinaryLocator, Config, LifecycleError, Orchestrator};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    std::fs::create_dir_all(&config.state_dir)
        .with_context(|| format!("creating {}", config.state_dir.display()))?;
    let _log_guard = init_logging(&config)?;

    let lock = match startup(&config) {
        Ok(lock) => lock,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return Err(e.into());
        }
    };

    let orchestrator = Orchestrator::new(
        config.paths.clone(),
        Arc::new(StrategyLauncher::standard()),
        Arc::new(SystemProbe),
        Arc::new(BinaryLocator::new(config.worker_bin.clone())),
        SystemClock,
    )
    .with_spawn_grace(config.spawn_grace)
    .with_pid_timeout(config.pid_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.addr, e))?;
    tracing::info!(addr = %config.addr, state_dir = %config.state_dir.display(), "listening");

    axum::serve(listener, router(Arc::new(orchestrator)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving control plane")?;

    tracing::info!("shutting down");
    lock.release();
    Ok(())
}

/// Append to `daemon.log` through a non-blocking writer. Keep the guard
/// alive for the life of the process or buffered lines are lost.
fn init_logging(config: &Config) -> anyhow::Result<WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening {}", config.log_path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(pid = std::process::id(), version = env!("CARGO_PKG_VERSION"), "--- sweepd starting ---");
    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}
