// src/extract.rs
// Structured-output recovery for AI responses.
//
// The model inconsistently wraps JSON in Markdown fences, so extraction is
// two-tier: a fenced ```json block first, the whole raw text second. Both
// failing is a Format error. Required-key validation is centralized here:
// the payload must deserialize into the caller's type, and a parse that
// succeeds as JSON but misses required keys is a distinct Shape error.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ScoutError};

fn fence_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap())
}

/// Recover a JSON value from raw AI text: fenced block first, raw text second.
pub fn json_value(raw: &str) -> Result<Value> {
    if let Some(caps) = fence_re().captures(raw) {
        let interior = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if let Ok(v) = serde_json::from_str::<Value>(interior.trim()) {
            return Ok(v);
        }
    }

    serde_json::from_str::<Value>(raw.trim())
        .map_err(|e| ScoutError::Format(format!("no parseable JSON in AI output: {e}")))
}

/// Recover a typed payload. Missing or mistyped required keys surface as
/// `ScoutError::Shape`, never as a silent default or a later panic.
pub fn json_payload<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value = json_value(raw)?;
    serde_json::from_value::<T>(value).map_err(|e| ScoutError::Shape(e.to_string()))
}
