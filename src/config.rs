// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";
pub const DEFAULT_COUNTRY: &str = "gb";
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 20;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Settings for the external job-listing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSearchConfig {
    pub base_url: String,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    /// Locale path segment, e.g. `gb` in `/gb/search/1`.
    pub country: String,
    pub results_per_page: u32,
    pub timeout_secs: u64,
}

impl Default for JobSearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            app_id: None,
            app_key: None,
            country: DEFAULT_COUNTRY.to_string(),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
        }
    }
}

impl JobSearchConfig {
    /// Both the application id and key are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.app_id), non_empty(&self.app_key)) {
            (Some(id), Some(key)) => Some((id, key)),
            _ => None,
        }
    }
}

/// Settings for the chat-completion backend used for market summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSummaryConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for MarketSummaryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
        }
    }
}

impl MarketSummaryConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.endpoint), non_empty(&self.api_key)) {
            (Some(endpoint), Some(key)) => Some((endpoint, key)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub job_search: JobSearchConfig,
    pub market_summary: MarketSummaryConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: AppConfig,
    #[serde(default)]
    production: AppConfig,
}

impl AppConfig {
    /// Load configuration for the current environment, then apply
    /// environment-variable overrides for credentials and endpoints.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("config.yaml"));

        let mut config = if path.exists() {
            Self::load_from_file(&path, &environment)?
        } else {
            warn!(
                "{} not found, using built-in defaults and environment variables",
                path.display()
            );
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBSIGHT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Environment wins over the file. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("ADZUNA_APP_ID") {
            self.job_search.app_id = Some(v);
        }
        if let Some(v) = get("ADZUNA_APP_KEY") {
            self.job_search.app_key = Some(v);
        }
        if let Some(v) = get("ADZUNA_BASE_URL") {
            self.job_search.base_url = v;
        }
        if let Some(v) = get("AZURE_AI_ENDPOINT") {
            self.market_summary.endpoint = Some(v);
        }
        if let Some(v) = get("AZURE_AI_KEY") {
            self.market_summary.api_key = Some(v);
        }
        if let Some(v) = get("AZURE_AI_MODEL") {
            self.market_summary.model = v;
        }
        if let Some(port) = get("JOBSIGHT_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
