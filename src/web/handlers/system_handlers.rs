// src/web/handlers/system_handlers.rs
use crate::job_search::JobSearchClient;
use crate::market_summary::MarketSummaryClient;
use crate::web::types::{HealthResponse, ServiceStatus};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

fn status_label(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "not_configured"
    }
}

pub async fn health_handler(
    jobs: &State<JobSearchClient>,
    summaries: &State<MarketSummaryClient>,
) -> Json<HealthResponse> {
    info!("Health check");

    // The service can answer without the AI backend, but not without search.
    let status = if jobs.is_configured() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: ServiceStatus {
            job_search: status_label(jobs.is_configured()),
            market_summary: status_label(summaries.is_configured()),
        },
        version: env!("CARGO_PKG_VERSION"),
    })
}
