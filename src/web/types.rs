// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::job_search::SearchResult;
use crate::market_summary::MarketSummary;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

/// Search results plus the optional market analysis shown beside them.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchPageData {
    pub job_title: String,
    pub location: String,
    pub search: SearchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_summary: Option<MarketSummary>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DescribeRequest {
    pub description: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ServiceStatus {
    pub job_search: &'static str,
    pub market_summary: &'static str,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub services: ServiceStatus,
    pub version: &'static str,
}
