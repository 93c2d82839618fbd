// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, std::env::var(k).ok())).collect();
    for (k, v) in vars {
        match v {
            Some(v) => std::env::set_var(k, v),
            None => std::env::remove_var(k),
        }
    }
    let out = f();
    for (k, v) in saved {
        match v {
            Some(v) => std::env::set_var(k, v),
            None => std::env::remove_var(k),
        }
    }
    out
}

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    let dir = with_env(
        &[("SWEEP_STATE_DIR", Some("/srv/sweep")), ("XDG_STATE_HOME", Some("/xdg"))],
        state_dir,
    );
    assert_eq!(dir.unwrap(), PathBuf::from("/srv/sweep"));
}

#[test]
#[serial]
fn state_dir_falls_back_to_xdg_then_home() {
    let xdg = with_env(&[("SWEEP_STATE_DIR", None), ("XDG_STATE_HOME", Some("/xdg"))], state_dir);
    assert_eq!(xdg.unwrap(), PathBuf::from("/xdg/sweep"));

    let home = with_env(
        &[("SWEEP_STATE_DIR", None), ("XDG_STATE_HOME", None), ("HOME", Some("/home/op"))],
        state_dir,
    );
    assert_eq!(home.unwrap(), PathBuf::from("/home/op/.local/state/sweep"));
}

#[test]
#[serial]
fn defaults_apply_when_unset_or_invalid() {
    with_env(
        &[
            ("SWEEP_ADDR", None),
            ("SWEEP_SPAWN_GRACE_MS", Some("soon")),
            ("SWEEP_PID_TIMEOUT_SECS", None),
        ],
        || {
            assert_eq!(listen_addr().unwrap().to_string(), DEFAULT_ADDR);
            assert_eq!(spawn_grace(), Duration::from_secs(1));
            assert_eq!(pid_timeout(), Duration::from_secs(20));
        },
    );
}

#[test]
#[serial]
fn bad_listen_addr_is_an_error() {
    let result = with_env(&[("SWEEP_ADDR", Some("not-an-addr"))], listen_addr);
    assert!(matches!(result, Err(LifecycleError::BadAddr(_))));
}
