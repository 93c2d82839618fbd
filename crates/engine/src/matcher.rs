// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// First keyword, in job order, occurring case-insensitively in `surface`.
pub fn find_keyword<'a>(surface: &str, keywords: &'a [String]) -> Option<&'a str> {
    if surface.is_empty() {
        return None;
    }
    let haystack = surface.to_lowercase();
    keywords.iter().map(String::as_str).find(|kw| haystack.contains(&kw.to_lowercase()))
}

/// URL shortened for log lines: at most 90 characters, `...` when cut.
pub fn short_url(url: &str) -> String {
    const MAX: usize = 90;
    if url.chars().count() <= MAX {
        return url.to_string();
    }
    let head: String = url.chars().take(MAX - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
