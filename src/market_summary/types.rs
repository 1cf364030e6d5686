// src/market_summary/types.rs
use serde::{Deserialize, Serialize};

// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Result of a market-summary request. `error` is the soft-failure flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub summary: String,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Raw cause of a transport failure, for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl MarketSummary {
    pub fn success(summary: String, job_count: usize, location: &str, job_title: &str) -> Self {
        Self {
            summary,
            error: false,
            job_count: Some(job_count),
            location: Some(location.to_string()),
            job_title: Some(job_title.to_string()),
            error_message: None,
        }
    }

    pub fn failed(summary: impl Into<String>, error_message: Option<String>) -> Self {
        Self {
            summary: summary.into(),
            error: true,
            job_count: None,
            location: None,
            job_title: None,
            error_message,
        }
    }
}
