// src/web/handlers/search_handlers.rs
use crate::job_search::client::CREDENTIALS_NOT_CONFIGURED;
use crate::job_search::{JobCategory, JobSearchClient};
use crate::market_summary::MarketSummaryClient;
use crate::web::types::{
    DataResponse, DescribeRequest, SearchPageData, StandardErrorResponse, TextResponse,
};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub type ApiError = (Status, Json<StandardErrorResponse>);

fn bad_request(message: &str, suggestions: Vec<String>) -> ApiError {
    (
        Status::BadRequest,
        Json(StandardErrorResponse::new(
            message.to_string(),
            "BAD_REQUEST".to_string(),
            suggestions,
        )),
    )
}

pub async fn search_jobs_handler(
    job_title: Option<String>,
    location: Option<String>,
    page: Option<u32>,
    jobs: &State<JobSearchClient>,
    summaries: &State<MarketSummaryClient>,
) -> Result<Json<DataResponse<SearchPageData>>, ApiError> {
    let job_title = job_title.unwrap_or_default().trim().to_string();
    let location = location.unwrap_or_default().trim().to_string();
    let page = page.unwrap_or(1).max(1);

    if job_title.is_empty() || location.is_empty() {
        return Err(bad_request(
            "Both job_title and location are required",
            vec![
                "Provide a job title, e.g. job_title=nurse".to_string(),
                "Provide a location, e.g. location=Leeds".to_string(),
            ],
        ));
    }

    info!(
        "Job search initiated - job_title: {}, location: {}, page: {}",
        job_title, location, page
    );

    let search = jobs.search_page(&job_title, &location, page).await;

    if let Some(message) = &search.error {
        let (status, error_code, suggestions) = categorize_search_error(message);
        return Err((
            status,
            Json(StandardErrorResponse::new(
                message.clone(),
                error_code,
                suggestions,
            )),
        ));
    }

    let market_summary = if search.listings.is_empty() {
        None
    } else {
        let summary = summaries
            .summarize(&job_title, &location, &search.listings)
            .await;
        if summary.error {
            warn!(
                "Market summary unavailable - job_title: {}, location: {}: {}",
                job_title, location, summary.summary
            );
        }
        Some(summary)
    };

    let message = format!(
        "Found {} jobs for {} in {}",
        search.total_count, job_title, search.location_suggestion
    );

    Ok(Json(DataResponse::success(
        message,
        SearchPageData {
            job_title,
            location,
            search,
            market_summary,
        },
    )))
}

fn categorize_search_error(message: &str) -> (Status, String, Vec<String>) {
    if message == CREDENTIALS_NOT_CONFIGURED {
        (
            Status::ServiceUnavailable,
            "SERVICE_CONFIG_ERROR".to_string(),
            vec![
                "Set ADZUNA_APP_ID and ADZUNA_APP_KEY".to_string(),
                "Contact system administrator".to_string(),
            ],
        )
    } else {
        (
            Status::BadGateway,
            "JOB_SEARCH_ERROR".to_string(),
            vec![
                "The job search provider is temporarily unavailable".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    }
}

pub async fn describe_job_handler(
    request: Json<DescribeRequest>,
    summaries: &State<MarketSummaryClient>,
) -> Result<Json<TextResponse>, ApiError> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(bad_request(
            "Description must not be empty",
            vec!["Send the job description text in the description field".to_string()],
        ));
    }

    let summary = summaries.summarize_description(description).await;
    Ok(Json(TextResponse::success(summary)))
}

pub async fn categories_handler(
    jobs: &State<JobSearchClient>,
) -> Json<DataResponse<Vec<JobCategory>>> {
    let categories = jobs.categories().await;
    if categories.is_empty() {
        error!("No job categories available");
    }

    Json(DataResponse::success(
        format!("{} categories", categories.len()),
        categories,
    ))
}
