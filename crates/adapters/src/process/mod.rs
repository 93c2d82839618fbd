// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached worker process creation.
//!
//! The worker must outlive the request that launched it, so it runs in its
//! own process group with its output appended to a log file. Strategies are
//! tried in order until one succeeds.

mod probe;

pub use probe::{ProcessProbe, SystemProbe};

use async_trait::async_trait;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;

/// Environment variable the shell strategy reads the log path from.
const LAUNCH_LOG_ENV: &str = "SWEEP_LAUNCH_LOG";

/// Errors from launching a detached process
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{strategy}: {message}")]
    Failed { strategy: &'static str, message: String },
    /// Every strategy failed; messages are joined in attempt order.
    #[error("all launch strategies failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),
}

/// What to run and where its output goes.
#[derive(Debug, Clone, Default)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub work_dir: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), ..Self::default() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn log_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    fn open_log(&self) -> std::io::Result<(Stdio, Stdio)> {
        let Some(path) = &self.log_path else {
            return Ok((Stdio::null(), Stdio::null()));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let out = OpenOptions::new().create(true).append(true).open(path)?;
        let err = out.try_clone()?;
        Ok((Stdio::from(out), Stdio::from(err)))
    }
}

/// A launched process. `pid` is `None` when the strategy cannot observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    pub strategy: &'static str,
    pub pid: Option<u32>,
}

#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn spawn(&self, spec: &LaunchSpec) -> Result<Launched, LaunchError>;
}

/// Spawn the program directly in a fresh process group.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectSpawn;

#[async_trait]
impl ProcessLauncher for DirectSpawn {
    async fn spawn(&self, spec: &LaunchSpec) -> Result<Launched, LaunchError> {
        let failed = |message: String| LaunchError::Failed { strategy: "direct", message };
        let (stdout, stderr) = spec.open_log().map_err(|e| failed(format!("log: {e}")))?;

        let mut cmd = tokio::process::Command::new(&spec.program);
        cmd.args(&spec.args).stdin(Stdio::null()).stdout(stdout).stderr(stderr).process_group(0);
        if let Some(dir) = &spec.work_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|e| failed(e.to_string()))?;
        let pid = child.id();

        // Reap in the background so a finished worker never lingers as a
        // zombie that still answers liveness probes.
        let program = spec.program.display().to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::info!(%program, ?pid, %status, "worker process exited"),
                Err(e) => tracing::error!(%program, ?pid, error = %e, "failed to wait on worker"),
            }
        });

        Ok(Launched { strategy: "direct", pid })
    }
}

/// Background the program through `sh -c 'nohup … &'`. Cannot report a pid.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellSpawn;

#[async_trait]
impl ProcessLauncher for ShellSpawn {
    async fn spawn(&self, spec: &LaunchSpec) -> Result<Launched, LaunchError> {
        let failed = |message: String| LaunchError::Failed { strategy: "shell", message };
        let log = spec.log_path.clone().unwrap_or_else(|| PathBuf::from("/dev/null"));

        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c")
            .arg(format!(r#"nohup "$0" "$@" >>"${LAUNCH_LOG_ENV}" 2>&1 </dev/null &"#))
            .arg(&spec.program)
            .args(&spec.args)
            .env(LAUNCH_LOG_ENV, &log)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.work_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "exit {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(Launched { strategy: "shell", pid: None })
    }
}

/// Tries each strategy in order, returning the first success.
pub struct StrategyLauncher {
    strategies: Vec<Box<dyn ProcessLauncher>>,
}

impl StrategyLauncher {
    pub fn new(strategies: Vec<Box<dyn ProcessLauncher>>) -> Self {
        Self { strategies }
    }

    /// `direct`, then `shell`.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(DirectSpawn), Box::new(ShellSpawn)])
    }
}

#[async_trait]
impl ProcessLauncher for StrategyLauncher {
    async fn spawn(&self, spec: &LaunchSpec) -> Result<Launched, LaunchError> {
        let mut errors = Vec::new();
        for strategy in &self.strategies {
            match strategy.spawn(spec).await {
                Ok(launched) => {
                    tracing::info!(
                        strategy = launched.strategy,
                        pid = ?launched.pid,
                        program = %spec.program.display(),
                        "process launched"
                    );
                    return Ok(launched);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "launch strategy failed");
                    errors.push(e.to_string());
                }
            }
        }
        Err(LaunchError::Exhausted(errors))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{LaunchError, LaunchSpec, Launched, ProcessLauncher};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type SpawnHook = Arc<dyn Fn(&LaunchSpec) + Send + Sync>;

    #[derive(Default)]
    struct FakeLaunchState {
        spawned: Vec<LaunchSpec>,
        fail_with: Option<String>,
        pid: Option<u32>,
    }

    /// Records launches instead of creating processes.
    #[derive(Clone)]
    pub struct FakeLauncher {
        inner: Arc<Mutex<FakeLaunchState>>,
        hook: Option<SpawnHook>,
    }

    impl Default for FakeLauncher {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeLaunchState { pid: Some(4242), ..Default::default() })),
                hook: None,
            }
        }
    }

    impl FakeLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Report this pid (or none) on success.
        pub fn with_pid(self, pid: Option<u32>) -> Self {
            self.inner.lock().pid = pid;
            self
        }

        /// Fail every spawn with `message`.
        pub fn failing(self, message: &str) -> Self {
            self.inner.lock().fail_with = Some(message.to_string());
            self
        }

        /// Run `hook` on every successful spawn, e.g. to start an in-process worker.
        pub fn on_spawn(mut self, hook: impl Fn(&LaunchSpec) + Send + Sync + 'static) -> Self {
            self.hook = Some(Arc::new(hook));
            self
        }

        pub fn spawned(&self) -> Vec<LaunchSpec> {
            self.inner.lock().spawned.clone()
        }
    }

    #[async_trait]
    impl ProcessLauncher for FakeLauncher {
        async fn spawn(&self, spec: &LaunchSpec) -> Result<Launched, LaunchError> {
            let pid = {
                let mut inner = self.inner.lock();
                if let Some(message) = &inner.fail_with {
                    return Err(LaunchError::Exhausted(vec![message.clone()]));
                }
                inner.spawned.push(spec.clone());
                inner.pid
            };
            if let Some(hook) = &self.hook {
                hook(spec);
            }
            Ok(Launched { strategy: "fake", pid })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLauncher;
#[cfg(any(test, feature = "test-support"))]
pub use probe::FakeProbe;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
