// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn generated_ids_carry_prefix_and_are_unique() {
    let a = JobId::generate();
    let b = JobId::generate();
    assert!(a.as_str().starts_with("job-"));
    assert_eq!(a.as_str().len(), 23);
    assert_ne!(a, b);
}

#[test]
fn default_id_is_empty() {
    assert!(JobId::default().is_empty());
}

#[test]
fn serializes_as_plain_string() {
    let id = JobId::from("job-abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-abc\"");
    let back: JobId = serde_json::from_str("\"job-abc\"").unwrap();
    assert_eq!(back, "job-abc");
}
