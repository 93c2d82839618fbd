// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn own_process_is_alive() {
    assert!(SystemProbe.is_alive(std::process::id()));
}

#[yare::parameterized(
    zero       = { 0 },
    max        = { u32::MAX },
    beyond_i32 = { i32::MAX as u32 + 1 },
)]
fn invalid_pids_are_dead(pid: u32) {
    assert!(!SystemProbe.is_alive(pid));
}

#[test]
fn reaped_child_is_dead() {
    let mut child = std::process::Command::new("true").spawn().unwrap();
    let pid = child.id();
    child.wait().unwrap();
    assert!(!SystemProbe.is_alive(pid));
}

#[test]
fn fake_probe_tracks_kills() {
    let probe = FakeProbe::new().alive(7);
    assert!(probe.is_alive(7));
    probe.kill(7);
    assert!(!probe.is_alive(7));
}
