// src/market_summary/prompt.rs
use super::features::MarketFeatureSummary;
use crate::job_search::format_salary_range;

pub const PROMPT_COMPANY_LIMIT: usize = 5;
pub const MARKET_WORD_BUDGET: u32 = 400;
pub const NO_RESULTS_WORD_BUDGET: u32 = 300;

pub fn build_prompt(job_title: &str, location: &str, features: &MarketFeatureSummary) -> String {
    if features.total_jobs == 0 {
        return no_results_prompt(job_title, location);
    }

    let companies = if features.companies.is_empty() {
        "Various companies".to_string()
    } else {
        features
            .companies
            .iter()
            .take(PROMPT_COMPANY_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let contract_types = if features.contract_types.is_empty() {
        "Mixed".to_string()
    } else {
        features.contract_types.join(", ")
    };

    let mut lines = vec![
        format!(
            "Analyze the job market for \"{}\" positions in \"{}\" based on the following data:",
            job_title, location
        ),
        String::new(),
        format!("Total jobs found: {}", features.total_jobs),
        format!("Top hiring companies: {}", companies),
        format!("Contract types available: {}", contract_types),
    ];

    if let Some(averages) = features.average_salary() {
        lines.push(format!(
            "Average salary range: {}",
            format_salary_range(averages.min, averages.max)
        ));
    }

    lines.extend([
        String::new(),
        "Provide a concise market summary covering:".to_string(),
        "1. Market demand and competition level".to_string(),
        "2. Salary expectations and trends".to_string(),
        "3. Key skills or qualifications in demand".to_string(),
        "4. Actionable insights for recruiters".to_string(),
        String::new(),
        format!(
            "Keep the response under {} words and focus on practical insights for recruitment professionals.",
            MARKET_WORD_BUDGET
        ),
    ]);

    lines.join("\n")
}

fn no_results_prompt(job_title: &str, location: &str) -> String {
    format!(
        "Analyze the job market for \"{job_title}\" positions in \"{location}\".\n\
         \n\
         No jobs were found for this search. Please provide insights on:\n\
         1. Possible reasons for the lack of results\n\
         2. Alternative job titles or locations to consider\n\
         3. Market trends that might explain this situation\n\
         4. Recommendations for recruiters\n\
         \n\
         Keep the response under {NO_RESULTS_WORD_BUDGET} words, concise and actionable for recruiters."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_summary::features::SalarySample;

    fn features_with(samples: Vec<SalarySample>) -> MarketFeatureSummary {
        MarketFeatureSummary {
            total_jobs: samples.len().max(1),
            companies: vec!["Acme".to_string(), "Globex".to_string()],
            salary_samples: samples,
            contract_types: vec!["permanent".to_string()],
            locations: vec!["London".to_string()],
        }
    }

    fn sample(min: Option<f64>, max: Option<f64>) -> SalarySample {
        SalarySample {
            min,
            max,
            predicted: false,
        }
    }

    #[test]
    fn test_zero_results_template() {
        let prompt = build_prompt("Ice Sculptor", "Swindon", &MarketFeatureSummary::default());
        assert!(prompt.starts_with("Analyze the job market for \"Ice Sculptor\" positions in \"Swindon\"."));
        assert!(prompt.contains("No jobs were found"));
        assert!(prompt.contains("Alternative job titles or locations"));
        assert!(prompt.contains("under 300 words"));
        assert!(!prompt.contains("Total jobs found"));
        assert!(!prompt.contains("Average salary"));
    }

    #[test]
    fn test_market_prompt_interpolation() {
        let prompt = build_prompt("Nurse", "Leeds", &features_with(vec![]));
        assert!(prompt.contains("\"Nurse\" positions in \"Leeds\" based on the following data"));
        assert!(prompt.contains("Total jobs found: 1"));
        assert!(prompt.contains("Top hiring companies: Acme, Globex"));
        assert!(prompt.contains("Contract types available: permanent"));
        assert!(prompt.contains("under 400 words"));
        assert!(!prompt.contains("Average salary range"));
    }

    #[test]
    fn test_fallback_labels() {
        let features = MarketFeatureSummary {
            total_jobs: 4,
            ..MarketFeatureSummary::default()
        };
        let prompt = build_prompt("Chef", "York", &features);
        assert!(prompt.contains("Top hiring companies: Various companies"));
        assert!(prompt.contains("Contract types available: Mixed"));
    }

    #[test]
    fn test_company_list_limited_to_five() {
        let features = MarketFeatureSummary {
            total_jobs: 10,
            companies: (1..=8).map(|i| format!("C{i}")).collect(),
            ..MarketFeatureSummary::default()
        };
        let prompt = build_prompt("Chef", "York", &features);
        assert!(prompt.contains("Top hiring companies: C1, C2, C3, C4, C5\n"));
        assert!(!prompt.contains("C6"));
    }

    #[test]
    fn test_partial_salary_samples_are_averaged_independently() {
        let features = features_with(vec![
            sample(Some(40000.0), None),
            sample(None, Some(80000.0)),
        ]);
        let prompt = build_prompt("Analyst", "Bath", &features);
        assert!(prompt.contains("Average salary range: £40,000 - £80,000"));
    }

    #[test]
    fn test_salary_line_with_minimums_only() {
        let features = features_with(vec![
            sample(Some(30000.0), None),
            sample(Some(35000.0), None),
        ]);
        let prompt = build_prompt("Analyst", "Bath", &features);
        assert!(prompt.contains("Average salary range: £32,500+"));
    }
}
