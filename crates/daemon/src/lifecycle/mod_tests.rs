// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn config_under_lays_out_state_dir() {
    let config = Config::under(PathBuf::from("/var/sweep"));
    assert_eq!(config.paths.state, PathBuf::from("/var/sweep/state.json"));
    assert_eq!(config.paths.stop, PathBuf::from("/var/sweep/stop.flag"));
    assert_eq!(config.lock_path, PathBuf::from("/var/sweep/daemon.pid"));
    assert_eq!(config.log_path, PathBuf::from("/var/sweep/daemon.log"));
    assert_eq!(config.addr.to_string(), "127.0.0.1:7878");
    assert_eq!(config.pid_timeout, Duration::from_secs(20));
}
