// src/job_search/types.rs
use serde::{Deserialize, Serialize};

use super::salary::format_salary;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const DEFAULT_TITLE: &str = "No title available";
pub const DEFAULT_COMPANY: &str = "Company not specified";
pub const DEFAULT_LOCATION: &str = "Location not specified";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_CATEGORY: &str = "Other";

pub const INVALID_TITLE: &str = "Invalid job data";
pub const INVALID_COMPANY: &str = "Unknown";
pub const INVALID_LOCATION: &str = "Unknown";
pub const INVALID_DESCRIPTION: &str = "Job data format error";

/// One normalized job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub external_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_is_predicted: bool,
    pub contract_type: String,
    pub contract_time: String,
    pub created: String,
    pub posting_url: String,
    pub ad_reference: String,
    #[serde(skip)]
    pub(super) malformed: bool,
}

impl JobListing {
    /// Stand-in for a `results` element that was not an object.
    pub fn placeholder() -> Self {
        Self {
            external_id: String::new(),
            title: INVALID_TITLE.to_string(),
            company: INVALID_COMPANY.to_string(),
            location: INVALID_LOCATION.to_string(),
            description: INVALID_DESCRIPTION.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            salary_min: None,
            salary_max: None,
            salary_is_predicted: false,
            contract_type: NOT_SPECIFIED.to_string(),
            contract_time: NOT_SPECIFIED.to_string(),
            created: String::new(),
            posting_url: String::new(),
            ad_reference: String::new(),
            malformed: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.malformed
    }

    pub fn has_salary(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }

    pub fn salary_display(&self) -> String {
        format_salary(self.salary_min, self.salary_max, self.salary_is_predicted)
    }
}

/// Outcome of one search call. When `error` is set the listings are empty
/// and the count is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub listings: Vec<JobListing>,
    pub total_count: u64,
    pub page: u32,
    pub total_pages: u64,
    pub location_suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    pub fn failed(page: u32, location: &str, message: impl Into<String>) -> Self {
        Self {
            listings: Vec::new(),
            total_count: 0,
            page,
            total_pages: 0,
            location_suggestion: location.to_string(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub tag: String,
    pub label: String,
}

/// Ceiling division of the upstream count by the page size. A zero page
/// size yields zero pages rather than dividing by zero.
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    let page_size = u64::from(page_size);
    total_count.div_ceil(page_size)
}
