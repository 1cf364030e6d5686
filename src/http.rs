// src/http.rs
//! Response validation shared by the outbound clients.

use crate::error::IntegrationError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde_json::{Map, Value};
use std::time::Duration;

pub(crate) fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .pool_max_idle_per_host(0)
        .build()
}

/// Check status and content type, decode the body and require a JSON object
/// at the root. Each step fails with its own error kind.
pub(crate) async fn read_json_object(
    response: Response,
) -> Result<Map<String, Value>, IntegrationError> {
    let status = response.status();
    if !status.is_success() {
        return Err(IntegrationError::Transport(format!("HTTP status {}", status)));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.contains("application/json") {
        return Err(IntegrationError::Format { content_type });
    }

    let body = response.text().await?;
    let value: Value =
        serde_json::from_str(&body).map_err(|e| IntegrationError::Parse(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(IntegrationError::Structure(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
