// src/job_search/mod.rs
pub mod client;
pub mod normalize;
pub mod salary;
pub mod types;

pub use client::JobSearchClient;
pub use normalize::normalize_listing;
pub use salary::{format_salary, format_salary_range};
pub use types::{total_pages, JobCategory, JobListing, SearchResult};
