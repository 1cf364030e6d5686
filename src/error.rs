// src/error.rs
//! Failure kinds for calls to the external job-search and text-generation
//! backends. None of these escape the public client methods: each client
//! turns them into a soft result with its own user-facing message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Credentials are absent, so no request was made.
    #[error("credentials not configured")]
    ConfigurationMissing,

    /// Network error, timeout or non-2xx status.
    #[error("{0}")]
    Transport(String),

    /// Response did not declare a JSON content type.
    #[error("unexpected content type: {content_type}")]
    Format { content_type: String },

    /// Body claimed to be JSON but did not decode.
    #[error("invalid JSON body: {0}")]
    Parse(String),

    /// Decoded JSON lacks the minimally expected shape.
    #[error("unexpected response structure: {0}")]
    Structure(String),
}

impl From<reqwest::Error> for IntegrationError {
    // The request URL carries credentials in its query string.
    fn from(err: reqwest::Error) -> Self {
        IntegrationError::Transport(err.without_url().to_string())
    }
}

impl IntegrationError {
    /// Short machine-readable label, used in logs and API error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            IntegrationError::ConfigurationMissing => "configuration_missing",
            IntegrationError::Transport(_) => "transport",
            IntegrationError::Format { .. } => "format",
            IntegrationError::Parse(_) => "parse",
            IntegrationError::Structure(_) => "structure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            IntegrationError::ConfigurationMissing,
            IntegrationError::Transport("timed out".to_string()),
            IntegrationError::Format {
                content_type: "text/html".to_string(),
            },
            IntegrationError::Parse("expected value".to_string()),
            IntegrationError::Structure("missing choices".to_string()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(IntegrationError::kind).collect();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_transport_displays_raw_cause() {
        let err = IntegrationError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }
}
