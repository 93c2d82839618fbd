// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_session_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(FileSessionStore.load(dir.path()).unwrap(), None);
}

#[test]
fn save_creates_profile_dir_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("browser_profile");
    FileSessionStore.save(&profile, br#"{"a":{"sid":"1"}}"#).unwrap();

    assert!(profile.join(SESSION_FILE).exists());
    assert_eq!(std::fs::read_dir(&profile).unwrap().count(), 1);
    assert_eq!(
        FileSessionStore.load(&profile).unwrap().as_deref(),
        Some(br#"{"a":{"sid":"1"}}"#.as_slice())
    );
}

#[test]
fn blank_session_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(SESSION_FILE), "  \n").unwrap();
    assert_eq!(FileSessionStore.load(dir.path()).unwrap(), None);
}

#[test]
fn fake_store_is_keyed_by_profile() {
    let store = FakeSessionStore::new();
    store.save(Path::new("/a"), b"one").unwrap();
    assert_eq!(store.load(Path::new("/a")).unwrap().as_deref(), Some(b"one".as_slice()));
    assert_eq!(store.load(Path::new("/b")).unwrap(), None);
}
