// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning a rendered document into the text surface keywords are matched against.

use scraper::{Html, Node};

/// Upper bound on the extracted surface, in characters.
pub const MAX_SURFACE_CHARS: usize = 2_500_000;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Title, visible body text and raw markup, newline-joined and capped.
pub fn text_surface(html: &str) -> String {
    let doc = Html::parse_document(html);

    let title = doc
        .root_element()
        .descendants()
        .filter_map(scraper::ElementRef::wrap)
        .find(|el| el.value().name() == "title")
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let mut visible = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else { continue };
        let hidden = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => HIDDEN_ELEMENTS.contains(&el.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            visible.push(trimmed);
        }
    }

    let joined = [title.trim(), &visible.join(" "), html].join("\n");
    cap_chars(joined, MAX_SURFACE_CHARS)
}

/// Collapse runs of whitespace and cut to `max` characters.
pub fn condense(message: &str, max: usize) -> String {
    let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");
    cap_chars(collapsed, max)
}

fn cap_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
