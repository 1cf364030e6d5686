// src/job_search/normalize.rs
//! Mapping of raw upstream listing objects into [`JobListing`].
//!
//! Upstream payloads are only loosely typed: `company`, `location` and
//! `category` arrive either as an object carrying a display sub-field or as a
//! bare string, and any field may be missing or of the wrong type. Every
//! function here is total.

use serde_json::{Map, Value};
use tracing::warn;

use super::types::*;
use crate::http::json_type_name;

/// Shape of a field that may be structured or plain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// Object form; holds the named sub-field when it is a string.
    Structured(Option<&'a str>),
    Plain(&'a str),
    Absent,
}

impl<'a> FieldShape<'a> {
    pub fn of(raw: &'a Map<String, Value>, key: &str, sub_key: &str) -> Self {
        match raw.get(key) {
            Some(Value::Object(inner)) => {
                FieldShape::Structured(inner.get(sub_key).and_then(Value::as_str))
            }
            Some(Value::String(s)) => FieldShape::Plain(s),
            _ => FieldShape::Absent,
        }
    }

    pub fn resolve(self, default: &str) -> String {
        match self {
            FieldShape::Structured(Some(name)) | FieldShape::Plain(name) => name.to_string(),
            FieldShape::Structured(None) | FieldShape::Absent => default.to_string(),
        }
    }
}

fn text_field(raw: &Map<String, Value>, key: &str, default: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

// Numbers pass through as-is; anything else is treated as absent.
fn number_field(raw: &Map<String, Value>, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

fn flag_field(raw: &Map<String, Value>, key: &str) -> bool {
    match raw.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
        _ => false,
    }
}

/// Map one element of the upstream `results` array.
pub fn normalize_listing(raw: &Value) -> JobListing {
    let Some(raw) = raw.as_object() else {
        warn!(
            "Expected an object for job listing, got {}: {}",
            json_type_name(raw),
            raw
        );
        return JobListing::placeholder();
    };

    JobListing {
        external_id: text_field(raw, "id", ""),
        title: text_field(raw, "title", DEFAULT_TITLE),
        company: FieldShape::of(raw, "company", "display_name").resolve(DEFAULT_COMPANY),
        location: FieldShape::of(raw, "location", "display_name").resolve(DEFAULT_LOCATION),
        description: text_field(raw, "description", DEFAULT_DESCRIPTION),
        category: FieldShape::of(raw, "category", "label").resolve(DEFAULT_CATEGORY),
        salary_min: number_field(raw, "salary_min"),
        salary_max: number_field(raw, "salary_max"),
        salary_is_predicted: flag_field(raw, "salary_is_predicted"),
        contract_type: text_field(raw, "contract_type", NOT_SPECIFIED),
        contract_time: text_field(raw, "contract_time", NOT_SPECIFIED),
        created: text_field(raw, "created", ""),
        posting_url: text_field(raw, "redirect_url", ""),
        ad_reference: text_field(raw, "adref", ""),
        malformed: false,
    }
}

/// `payload.__CLASS__.location.display_name`, or `fallback` if any step
/// along that path is missing or has the wrong type.
pub fn location_suggestion(payload: &Map<String, Value>, fallback: &str) -> String {
    payload
        .get("__CLASS__")
        .and_then(Value::as_object)
        .and_then(|class| class.get("location"))
        .and_then(Value::as_object)
        .and_then(|location| location.get("display_name"))
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// Upstream `count`, or zero when absent, negative or not a number.
pub fn total_count(payload: &Map<String, Value>) -> u64 {
    match payload.get("count") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
            .unwrap_or(0),
        _ => 0,
    }
}
