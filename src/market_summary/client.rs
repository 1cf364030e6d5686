// src/market_summary/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::features::MarketFeatureSummary;
use super::prompt::build_prompt;
use super::types::{ChatMessage, ChatRequest, MarketSummary};
use crate::config::MarketSummaryConfig;
use crate::error::IntegrationError;
use crate::http::{build_client, read_json_object};
use crate::job_search::JobListing;

const MARKET_SYSTEM_PROMPT: &str = "You are an expert recruitment analyst providing insights about job markets. Provide concise, actionable insights for recruiters. Format your response as plain text with clear paragraphs, not markdown.";
const DESCRIPTION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes job descriptions concisely.";

pub const MARKET_MAX_TOKENS: u32 = 500;
pub const MARKET_TEMPERATURE: f64 = 0.7;
pub const DESCRIPTION_MAX_TOKENS: u32 = 150;
pub const DESCRIPTION_TEMPERATURE: f64 = 0.5;
pub const DESCRIPTION_INPUT_LIMIT: usize = 1000;

pub const SUMMARY_NOT_CONFIGURED: &str =
    "AI summary service is not configured. Please check your AI credentials.";
pub const SUMMARY_UNAVAILABLE: &str =
    "Unable to generate market summary at this time. Please try again later.";
pub const SUMMARY_FORMAT_ERROR: &str =
    "Unable to generate market summary due to API response format error.";
pub const SUMMARY_PARSE_ERROR: &str =
    "Unable to generate market summary due to response parsing error.";
pub const SUMMARY_STRUCTURE_ERROR: &str =
    "Unable to generate market summary due to unexpected response format.";

pub const DESCRIPTION_NOT_CONFIGURED: &str = "AI summary service not available.";
pub const DESCRIPTION_UNAVAILABLE: &str = "Summary not available.";
pub const DESCRIPTION_FORMAT_ERROR: &str = "Summary not available due to API response format error.";
pub const DESCRIPTION_PARSE_ERROR: &str = "Summary not available due to response parsing error.";
pub const DESCRIPTION_STRUCTURE_ERROR: &str =
    "Summary not available due to unexpected response format.";

/// Client for the chat-completion backend producing market analyses.
pub struct MarketSummaryClient {
    client: Client,
    config: MarketSummaryConfig,
}

impl MarketSummaryClient {
    pub fn new(config: MarketSummaryConfig) -> Result<Self> {
        if config.credentials().is_none() {
            warn!("AI summary credentials not configured");
        }

        let client = build_client(config.timeout_secs).context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }

    /// Market analysis for a batch of listings. Never fails: problems come
    /// back as a summary with `error: true`.
    pub async fn summarize(
        &self,
        job_title: &str,
        location: &str,
        listings: &[JobListing],
    ) -> MarketSummary {
        if !self.is_configured() {
            return MarketSummary::failed(SUMMARY_NOT_CONFIGURED, None);
        }

        let features = MarketFeatureSummary::from_listings(listings);
        let prompt = build_prompt(job_title, location, &features);

        info!(
            "Requesting market summary - job_title: {}, location: {}, jobs: {}, model: {}",
            job_title, location, features.total_jobs, self.config.model
        );

        match self
            .complete(MARKET_SYSTEM_PROMPT, &prompt, MARKET_MAX_TOKENS, MARKET_TEMPERATURE)
            .await
        {
            Ok(summary) => MarketSummary::success(summary, listings.len(), location, job_title),
            Err(e) => {
                error!(
                    kind = e.kind(),
                    "Market summary failed - job_title: {}, location: {}, error: {}",
                    job_title,
                    location,
                    e
                );
                match e {
                    IntegrationError::ConfigurationMissing => {
                        MarketSummary::failed(SUMMARY_NOT_CONFIGURED, None)
                    }
                    IntegrationError::Transport(cause) => {
                        MarketSummary::failed(SUMMARY_UNAVAILABLE, Some(cause))
                    }
                    IntegrationError::Format { .. } => {
                        MarketSummary::failed(SUMMARY_FORMAT_ERROR, None)
                    }
                    IntegrationError::Parse(_) => MarketSummary::failed(SUMMARY_PARSE_ERROR, None),
                    IntegrationError::Structure(_) => {
                        MarketSummary::failed(SUMMARY_STRUCTURE_ERROR, None)
                    }
                }
            }
        }
    }

    /// Two-to-three sentence digest of a job description.
    pub async fn summarize_description(&self, description: &str) -> String {
        if !self.is_configured() {
            return DESCRIPTION_NOT_CONFIGURED.to_string();
        }

        let excerpt: String = description.chars().take(DESCRIPTION_INPUT_LIMIT).collect();
        let prompt = format!(
            "Summarize this job description in 2-3 sentences, highlighting the key responsibilities and requirements:\n\n{}",
            excerpt
        );

        match self
            .complete(
                DESCRIPTION_SYSTEM_PROMPT,
                &prompt,
                DESCRIPTION_MAX_TOKENS,
                DESCRIPTION_TEMPERATURE,
            )
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!(kind = e.kind(), "Failed to summarize job description: {}", e);
                match e {
                    IntegrationError::ConfigurationMissing => DESCRIPTION_NOT_CONFIGURED,
                    IntegrationError::Transport(_) => DESCRIPTION_UNAVAILABLE,
                    IntegrationError::Format { .. } => DESCRIPTION_FORMAT_ERROR,
                    IntegrationError::Parse(_) => DESCRIPTION_PARSE_ERROR,
                    IntegrationError::Structure(_) => DESCRIPTION_STRUCTURE_ERROR,
                }
                .to_string()
            }
        }
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String, IntegrationError> {
        let (endpoint, api_key) = self
            .config
            .credentials()
            .ok_or(IntegrationError::ConfigurationMissing)?;

        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(endpoint)
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let payload = read_json_object(response).await?;
        let content = first_choice_content(&payload)?;

        info!("Received completion ({} chars)", content.len());
        Ok(content)
    }
}

/// `choices[0].message.content`, trimmed.
fn first_choice_content(payload: &Map<String, Value>) -> Result<String, IntegrationError> {
    let choices = payload
        .get("choices")
        .ok_or_else(|| IntegrationError::Structure("missing choices field".to_string()))?;

    choices
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            IntegrationError::Structure("choices[0].message.content is not a string".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHAT_PATH: &str = "/openai/deployments/gpt-4o/chat/completions";

    fn config_for(server: &MockServer) -> MarketSummaryConfig {
        MarketSummaryConfig {
            endpoint: Some(format!("{}{}", server.uri(), CHAT_PATH)),
            api_key: Some("secret".to_string()),
            timeout_secs: 2,
            ..MarketSummaryConfig::default()
        }
    }

    fn client_for(server: &MockServer) -> MarketSummaryClient {
        MarketSummaryClient::new(config_for(server)).unwrap()
    }

    fn completion(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
        }))
    }

    fn listings() -> Vec<JobListing> {
        let first = crate::job_search::normalize_listing(&json!({
            "id": "1",
            "title": "Rust Developer",
            "company": "Acme",
            "location": "London",
            "salary_min": 50000,
            "salary_max": 70000,
        }));
        vec![first, JobListing::placeholder()]
    }

    #[tokio::test]
    async fn test_unconfigured_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion("unused"))
            .expect(0)
            .mount(&server)
            .await;

        let config = MarketSummaryConfig {
            api_key: None,
            ..config_for(&server)
        };
        let client = MarketSummaryClient::new(config).unwrap();

        let summary = client.summarize("Rust Developer", "London", &listings()).await;
        assert!(summary.error);
        assert_eq!(summary.summary, SUMMARY_NOT_CONFIGURED);

        let description = client.summarize_description("Write Rust.").await;
        assert_eq!(description, DESCRIPTION_NOT_CONFIGURED);

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("api-key", "secret"))
            .and(body_partial_json(json!({
                "max_tokens": 500,
                "temperature": 0.7,
                "messages": [{"role": "system", "content": MARKET_SYSTEM_PROMPT}]
            })))
            .respond_with(completion("\n  Demand for Rust developers is strong.  \n"))
            .expect(1)
            .mount(&server)
            .await;

        let summary = client_for(&server)
            .summarize("Rust Developer", "London", &listings())
            .await;

        assert!(!summary.error);
        assert_eq!(summary.summary, "Demand for Rust developers is strong.");
        assert_eq!(summary.job_count, Some(2));
        assert_eq!(summary.location.as_deref(), Some("London"));
        assert_eq!(summary.job_title.as_deref(), Some("Rust Developer"));
    }

    #[tokio::test]
    async fn test_prompt_carries_features() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion("ok"))
            .mount(&server)
            .await;

        client_for(&server)
            .summarize("Rust Developer", "London", &listings())
            .await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user_prompt = body["messages"][1]["content"].as_str().unwrap();
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(user_prompt.contains("Total jobs found: 2"));
        assert!(user_prompt.contains("Top hiring companies: Acme\n"));
        assert!(user_prompt.contains("Average salary range: £50,000 - £70,000"));
    }

    #[tokio::test]
    async fn test_summarize_failure_kinds() {
        let server = MockServer::start().await;
        let cases = [
            ("/status", ResponseTemplate::new(502), SUMMARY_UNAVAILABLE),
            (
                "/html",
                ResponseTemplate::new(200).set_body_raw("<p>oops</p>", "text/html"),
                SUMMARY_FORMAT_ERROR,
            ),
            (
                "/garbled",
                ResponseTemplate::new(200).set_body_raw("{\"choices\": [", "application/json"),
                SUMMARY_PARSE_ERROR,
            ),
            (
                "/no-choices",
                ResponseTemplate::new(200).set_body_json(json!({"id": "cmpl-1"})),
                SUMMARY_STRUCTURE_ERROR,
            ),
            (
                "/array-root",
                ResponseTemplate::new(200).set_body_json(json!(["choices"])),
                SUMMARY_STRUCTURE_ERROR,
            ),
            (
                "/empty-choices",
                ResponseTemplate::new(200).set_body_json(json!({"choices": []})),
                SUMMARY_STRUCTURE_ERROR,
            ),
        ];

        for (route, template, _) in &cases {
            Mock::given(method("POST"))
                .and(path(*route))
                .respond_with(template.clone())
                .mount(&server)
                .await;
        }

        for (route, _, expected) in &cases {
            let config = MarketSummaryConfig {
                endpoint: Some(format!("{}{}", server.uri(), route)),
                ..config_for(&server)
            };
            let summary = MarketSummaryClient::new(config)
                .unwrap()
                .summarize("Rust Developer", "London", &listings())
                .await;
            assert!(summary.error, "route {route}");
            assert_eq!(summary.summary, *expected, "route {route}");
        }
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_cause() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let summary = client_for(&server)
            .summarize("Rust Developer", "London", &listings())
            .await;

        assert!(summary.error);
        assert_eq!(summary.summary, SUMMARY_UNAVAILABLE);
        assert!(summary.error_message.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_zero_listings_still_requests_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion("Try widening the search."))
            .mount(&server)
            .await;

        let summary = client_for(&server).summarize("Ice Sculptor", "Swindon", &[]).await;
        assert!(!summary.error);
        assert_eq!(summary.job_count, Some(0));

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user_prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(user_prompt.contains("No jobs were found"));
    }

    #[tokio::test]
    async fn test_summarize_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"max_tokens": 150, "temperature": 0.5})))
            .respond_with(completion(" Lead a small team building payment APIs. "))
            .expect(1)
            .mount(&server)
            .await;

        let long_description = "x".repeat(5000);
        let summary = client_for(&server)
            .summarize_description(&long_description)
            .await;
        assert_eq!(summary, "Lead a small team building payment APIs.");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user_prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(user_prompt.ends_with(&"x".repeat(DESCRIPTION_INPUT_LIMIT)));
        assert!(!user_prompt.contains(&"x".repeat(DESCRIPTION_INPUT_LIMIT + 1)));
    }

    #[tokio::test]
    async fn test_summarize_description_fallbacks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("plain text", "text/plain"))
            .mount(&server)
            .await;

        let summary = client_for(&server).summarize_description("Anything").await;
        assert_eq!(summary, DESCRIPTION_FORMAT_ERROR);

        let unreachable = MarketSummaryConfig {
            endpoint: Some("http://127.0.0.1:9/unreachable".to_string()),
            api_key: Some("secret".to_string()),
            ..MarketSummaryConfig::default()
        };
        let summary = MarketSummaryClient::new(unreachable)
            .unwrap()
            .summarize_description("Anything")
            .await;
        assert_eq!(summary, DESCRIPTION_UNAVAILABLE);
    }
}
