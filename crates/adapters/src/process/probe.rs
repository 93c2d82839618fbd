// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Answers whether a process id refers to a live process.
pub trait ProcessProbe: Send + Sync {
    fn is_alive(&self, pid: u32) -> bool;
}

/// Signal-0 probe. A process we may not signal still exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn is_alive(&self, pid: u32) -> bool {
        let Ok(raw) = i32::try_from(pid) else { return false };
        if raw <= 0 {
            return false;
        }
        match kill(Pid::from_raw(raw), None) {
            Ok(()) | Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::ProcessProbe;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Probe over an explicit set of live pids
    #[derive(Clone, Default)]
    pub struct FakeProbe {
        alive: Arc<Mutex<HashSet<u32>>>,
    }

    impl FakeProbe {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn alive(self, pid: u32) -> Self {
            self.alive.lock().insert(pid);
            self
        }

        pub fn kill(&self, pid: u32) {
            self.alive.lock().remove(&pid);
        }
    }

    impl ProcessProbe for FakeProbe {
        fn is_alive(&self, pid: u32) -> bool {
            self.alive.lock().contains(&pid)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProbe;

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
