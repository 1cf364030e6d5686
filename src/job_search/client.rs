// src/job_search/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

use super::normalize::{location_suggestion, normalize_listing, total_count};
use super::types::{total_pages, JobCategory, SearchResult};
use crate::config::JobSearchConfig;
use crate::error::IntegrationError;
use crate::http::{build_client, read_json_object};

pub const CREDENTIALS_NOT_CONFIGURED: &str = "Job search API credentials not configured";
pub const INVALID_RESPONSE_FORMAT: &str = "API returned invalid response format";
pub const PARSE_FAILURE: &str = "Failed to parse API response";

/// Client for the paginated job-listing API.
pub struct JobSearchClient {
    client: Client,
    config: JobSearchConfig,
}

impl JobSearchClient {
    pub fn new(config: JobSearchConfig) -> Result<Self> {
        if config.credentials().is_none() {
            warn!("Job search API credentials not configured");
        }

        let client = build_client(config.timeout_secs).context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }

    pub fn results_per_page(&self) -> u32 {
        self.config.results_per_page
    }

    /// Run one search. Never fails: problems are reported through
    /// [`SearchResult::error`].
    pub async fn search(
        &self,
        job_title: &str,
        location: &str,
        page: u32,
        page_size: u32,
    ) -> SearchResult {
        let page = page.max(1);
        let page_size = if page_size == 0 {
            self.config.results_per_page
        } else {
            page_size
        };

        match self.fetch_page(job_title, location, page, page_size).await {
            Ok(result) => {
                info!(
                    "Job search succeeded - job_title: {}, location: {}, page: {}, count: {}",
                    job_title, location, page, result.total_count
                );
                result
            }
            Err(e) => {
                error!(
                    kind = e.kind(),
                    "Job search failed - job_title: {}, location: {}, page: {}, error: {}",
                    job_title,
                    location,
                    page,
                    e
                );
                SearchResult::failed(page, location, Self::error_message(&e))
            }
        }
    }

    /// Search with the configured page size.
    pub async fn search_page(&self, job_title: &str, location: &str, page: u32) -> SearchResult {
        self.search(job_title, location, page, self.config.results_per_page)
            .await
    }

    fn error_message(err: &IntegrationError) -> String {
        match err {
            IntegrationError::ConfigurationMissing => CREDENTIALS_NOT_CONFIGURED.to_string(),
            IntegrationError::Transport(cause) => format!("Failed to fetch jobs: {}", cause),
            IntegrationError::Format { .. } | IntegrationError::Structure(_) => {
                INVALID_RESPONSE_FORMAT.to_string()
            }
            IntegrationError::Parse(_) => PARSE_FAILURE.to_string(),
        }
    }

    async fn fetch_page(
        &self,
        job_title: &str,
        location: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult, IntegrationError> {
        let (app_id, app_key) = self
            .config
            .credentials()
            .ok_or(IntegrationError::ConfigurationMissing)?;

        let url = format!(
            "{}/{}/search/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.country,
            page
        );
        let page_size_param = page_size.to_string();

        info!("Calling job search API: {} (what: {}, where: {})", url, job_title, location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", app_id),
                ("app_key", app_key),
                ("what", job_title),
                ("where", location),
                ("results_per_page", page_size_param.as_str()),
                ("sort_by", "relevance"),
            ])
            .send()
            .await?;

        let payload = read_json_object(response).await?;

        let listings = match payload.get("results") {
            Some(Value::Array(results)) => results.iter().map(normalize_listing).collect(),
            Some(other) => {
                warn!("Ignoring non-array results field: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        let total_count = total_count(&payload);

        Ok(SearchResult {
            listings,
            total_count,
            page,
            total_pages: total_pages(total_count, page_size),
            location_suggestion: location_suggestion(&payload, location),
            error: None,
        })
    }

    /// Job categories offered by the provider. Empty on any failure.
    pub async fn categories(&self) -> Vec<JobCategory> {
        match self.fetch_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(kind = e.kind(), "Failed to fetch job categories: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_categories(&self) -> Result<Vec<JobCategory>, IntegrationError> {
        let (app_id, app_key) = self
            .config
            .credentials()
            .ok_or(IntegrationError::ConfigurationMissing)?;

        let url = format!(
            "{}/{}/categories",
            self.config.base_url.trim_end_matches('/'),
            self.config.country
        );

        let response = self
            .client
            .get(&url)
            .query(&[("app_id", app_id), ("app_key", app_key)])
            .send()
            .await?;

        let payload = read_json_object(response).await?;

        let categories = payload
            .get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|item| {
                        let tag = item.get("tag")?.as_str()?;
                        let label = item.get("label")?.as_str()?;
                        Some(JobCategory {
                            tag: tag.to_string(),
                            label: label.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(categories)
    }
}
