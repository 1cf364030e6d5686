//! Job search and market analysis service.
//!
//! [`JobSearchClient`] queries a paginated job-listing API and normalizes its
//! loosely typed listings into [`JobListing`] records. [`MarketSummaryClient`]
//! turns a batch of listings into a short market analysis through a
//! chat-completion backend. Both clients report every failure inside their
//! return values.

pub mod config;
pub mod error;
mod http;
pub mod job_search;
pub mod market_summary;
pub mod web;

pub use config::AppConfig;
pub use error::IntegrationError;
pub use job_search::{JobListing, JobSearchClient, SearchResult};
pub use market_summary::{MarketSummary, MarketSummaryClient};
pub use web::start_web_server;
