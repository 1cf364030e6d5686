// src/market_summary/features.rs
//! Bounded aggregation of a batch of listings into prompt material.

use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::job_search::JobListing;

pub const MAX_LISTINGS_ANALYZED: usize = 20;
pub const MAX_COMPANIES: usize = 10;
pub const MAX_LOCATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalarySample {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub predicted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryAverages {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketFeatureSummary {
    pub total_jobs: usize,
    pub companies: Vec<String>,
    pub salary_samples: Vec<SalarySample>,
    pub contract_types: Vec<String>,
    pub locations: Vec<String>,
}

// Insertion-ordered set of non-empty strings.
#[derive(Default)]
struct UniqueValues {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl UniqueValues {
    fn push(&mut self, value: &str) {
        if value.is_empty() || self.seen.contains(value) {
            return;
        }
        self.seen.insert(value.to_string());
        self.values.push(value.to_string());
    }

    fn into_capped(self, cap: usize) -> Vec<String> {
        let mut values = self.values;
        values.truncate(cap);
        values
    }
}

impl MarketFeatureSummary {
    /// Scan at most the first [`MAX_LISTINGS_ANALYZED`] listings. Placeholder
    /// records standing in for malformed upstream elements are skipped;
    /// `total_jobs` still counts every listing passed in.
    pub fn from_listings(listings: &[JobListing]) -> Self {
        let mut companies = UniqueValues::default();
        let mut contract_types = UniqueValues::default();
        let mut locations = UniqueValues::default();
        let mut salary_samples = Vec::new();

        for listing in listings.iter().take(MAX_LISTINGS_ANALYZED) {
            if listing.is_placeholder() {
                warn!("Skipping malformed listing in market analysis");
                continue;
            }

            companies.push(&listing.company);
            contract_types.push(&listing.contract_type);
            locations.push(&listing.location);

            if listing.has_salary() {
                salary_samples.push(SalarySample {
                    min: listing.salary_min,
                    max: listing.salary_max,
                    predicted: listing.salary_is_predicted,
                });
            }
        }

        Self {
            total_jobs: listings.len(),
            companies: companies.into_capped(MAX_COMPANIES),
            salary_samples,
            contract_types: contract_types.into_capped(usize::MAX),
            locations: locations.into_capped(MAX_LOCATIONS),
        }
    }

    /// Mean of the non-null minimums and, separately, of the non-null
    /// maximums. `None` when no sample carries any bound.
    pub fn average_salary(&self) -> Option<SalaryAverages> {
        let mins: Vec<f64> = self.salary_samples.iter().filter_map(|s| s.min).collect();
        let maxes: Vec<f64> = self.salary_samples.iter().filter_map(|s| s.max).collect();

        if mins.is_empty() && maxes.is_empty() {
            return None;
        }

        Some(SalaryAverages {
            min: mean(&mins),
            max: mean(&maxes),
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
