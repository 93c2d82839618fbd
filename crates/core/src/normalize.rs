// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input normalization shared by job submission and the worker.
//!
//! Both sides apply the same rules so that a job written by the control
//! plane is a fixed point when the worker normalizes it again.

use std::collections::HashSet;

use crate::job::Limits;

/// Trim, parse, keep only `http`/`https`, dedupe by canonical form, cap.
pub fn normalize_urls<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for item in raw {
        let candidate = item.as_ref().trim();
        if candidate.is_empty() {
            continue;
        }
        let Ok(parsed) = url::Url::parse(candidate) else {
            continue;
        };
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            continue;
        }
        let canonical = parsed.to_string();
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
        if out.len() >= Limits::MAX_URLS {
            break;
        }
    }
    out
}

/// Trim, cap length, dedupe case-insensitively keeping the first spelling, cap.
pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for item in raw {
        // Trim again after truncation: a cut can expose trailing whitespace.
        let keyword = truncate_chars(item.as_ref().trim(), Limits::MAX_KEYWORD_LEN).trim();
        if keyword.is_empty() {
            continue;
        }
        if seen.insert(keyword.to_lowercase()) {
            out.push(keyword.to_string());
        }
        if out.len() >= Limits::MAX_KEYWORDS {
            break;
        }
    }
    out
}

/// Clamp a millisecond setting into `[min, max]`, using `default` when absent.
pub fn clamp_ms(value: Option<i64>, default: u64, min: u64, max: u64) -> u64 {
    match value {
        None => default,
        Some(v) if v < min as i64 => min,
        Some(v) if v > max as i64 => max,
        Some(v) => v as u64,
    }
}

/// Prefix of `s` holding at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
