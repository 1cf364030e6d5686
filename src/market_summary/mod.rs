// src/market_summary/mod.rs
pub mod client;
pub mod features;
pub mod prompt;
pub mod types;

pub use client::MarketSummaryClient;
pub use features::{MarketFeatureSummary, SalarySample};
pub use prompt::build_prompt;
pub use types::MarketSummary;
