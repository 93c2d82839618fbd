// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("unsupported action: {0}")]
    UnknownAction(String),
}

/// A control request. Parsing is lenient: a missing body or missing
/// `action` means `status`, and the action name is case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ControlRequest {
    Start(StartRequest),
    Stop,
    Status,
}

impl ControlRequest {
    pub fn parse(body: &[u8]) -> Result<Self, WireError> {
        let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let action = payload
            .get("action")
            .map(|a| match a {
                Value::String(s) => s.trim().to_lowercase(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "status".to_string());

        match action.as_str() {
            "status" => Ok(Self::Status),
            "stop" => Ok(Self::Stop),
            "start" => Ok(Self::Start(StartRequest::from_value(payload))),
            _ => Err(WireError::UnknownAction(action)),
        }
    }
}

/// Raw `start` parameters, before normalization and clamping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartRequest {
    pub urls: ListInput,
    pub keywords: ListInput,
    #[serde(skip_serializing_if = "NumberInput::is_absent")]
    pub delay_ms: NumberInput,
    #[serde(skip_serializing_if = "NumberInput::is_absent")]
    pub page_wait_ms: NumberInput,
    pub headless: FlagInput,
}

impl StartRequest {
    fn from_value(payload: Value) -> Self {
        serde_json::from_value(payload).unwrap_or_default()
    }

    /// URL candidates; a string is split on line breaks.
    pub fn url_items(&self) -> Vec<String> {
        self.urls.items(&['\r', '\n'])
    }

    /// Keyword candidates; a string is split on line breaks, `,` and `;`.
    pub fn keyword_items(&self) -> Vec<String> {
        self.keywords.items(&['\r', '\n', ',', ';'])
    }
}

/// A list given either as an array or as one delimited string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    List(Vec<Value>),
    Text(String),
    Other(Value),
}

impl Default for ListInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ListInput {
    pub fn of<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    fn items(&self, separators: &[char]) -> Vec<String> {
        match self {
            Self::List(values) => values
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Self::Text(text) => text.split(separators).map(str::to_string).collect(),
            Self::Other(_) => Vec::new(),
        }
    }
}

/// A millisecond setting given as a number or numeric string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    #[default]
    Absent,
    Int(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl NumberInput {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The integer value, or `None` when absent or not numeric.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
            _ => None,
        }
    }
}

/// A boolean given as `true`/`false` or one of `1/true/yes/on`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Text(String),
    Other(Value),
}

impl FlagInput {
    pub fn value(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n == 1,
            Self::Text(s) => {
                matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
