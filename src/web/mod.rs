// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::AppConfig;
use crate::job_search::{JobCategory, JobSearchClient};
use crate::market_summary::MarketSummaryClient;
use anyhow::Result;
use handlers::ApiError;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/search?<job_title>&<location>&<page>")]
pub async fn search_jobs(
    job_title: Option<String>,
    location: Option<String>,
    page: Option<u32>,
    jobs: &State<JobSearchClient>,
    summaries: &State<MarketSummaryClient>,
) -> Result<Json<DataResponse<SearchPageData>>, ApiError> {
    handlers::search_jobs_handler(job_title, location, page, jobs, summaries).await
}

#[post("/describe", data = "<request>")]
pub async fn describe_job(
    request: Json<DescribeRequest>,
    summaries: &State<MarketSummaryClient>,
) -> Result<Json<TextResponse>, ApiError> {
    handlers::describe_job_handler(request, summaries).await
}

#[get("/categories")]
pub async fn categories(jobs: &State<JobSearchClient>) -> Json<DataResponse<Vec<JobCategory>>> {
    handlers::categories_handler(jobs).await
}

#[get("/health")]
pub async fn health(
    jobs: &State<JobSearchClient>,
    summaries: &State<MarketSummaryClient>,
) -> Json<HealthResponse> {
    handlers::health_handler(jobs, summaries).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Available endpoints: /api/search, /api/describe, /api/categories, /api/health".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be processed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["Send a JSON body matching the endpoint's fields".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the API with both outbound clients as managed state.
pub fn build_rocket(config: &AppConfig) -> Result<Rocket<Build>> {
    let jobs = JobSearchClient::new(config.job_search.clone())?;
    let summaries = MarketSummaryClient::new(config.market_summary.clone())?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(jobs)
        .manage(summaries)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![search_jobs, describe_job, categories, health, options],
        ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let rocket = build_rocket(&config)?;

    info!("Starting JobSight API server");
    info!(
        "Server: http://{}:{}",
        config.server.address, config.server.port
    );
    info!("Job search API: {}", config.job_search.base_url);

    if let Err(e) = rocket.launch().await {
        error!("Server failed: {}", e);
        anyhow::bail!("Server failed: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JobSearchConfig, MarketSummaryConfig};
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_with(config: AppConfig) -> Client {
        Client::tracked(build_rocket(&config).unwrap()).await.unwrap()
    }

    fn configured(server: &MockServer) -> AppConfig {
        AppConfig {
            job_search: JobSearchConfig {
                base_url: server.uri(),
                app_id: Some("id".to_string()),
                app_key: Some("key".to_string()),
                timeout_secs: 2,
                ..JobSearchConfig::default()
            },
            market_summary: MarketSummaryConfig {
                endpoint: Some(format!("{}/chat", server.uri())),
                api_key: Some("secret".to_string()),
                timeout_secs: 2,
                ..MarketSummaryConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[rocket::async_test]
    async fn test_health_reports_configuration() {
        let client = client_with(AppConfig::default()).await;
        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["services"]["job_search"], "not_configured");
        assert_eq!(body["services"]["market_summary"], "not_configured");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[rocket::async_test]
    async fn test_search_requires_title_and_location() {
        let client = client_with(AppConfig::default()).await;
        let response = client
            .get("/api/search?job_title=%20%20&location=Leeds")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error_code"], "BAD_REQUEST");
        assert_eq!(body["success"], false);
    }

    #[rocket::async_test]
    async fn test_search_without_credentials() {
        let client = client_with(AppConfig::default()).await;
        let response = client
            .get("/api/search?job_title=nurse&location=Leeds")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::ServiceUnavailable);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error_code"], "SERVICE_CONFIG_ERROR");
    }

    #[rocket::async_test]
    async fn test_search_with_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gb/search/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{
                    "id": "77",
                    "title": "Staff Nurse",
                    "company": {"display_name": "NHS Trust"},
                    "location": {"display_name": "Leeds"}
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Nursing demand is high."}}]
            })))
            .mount(&server)
            .await;

        let client = client_with(configured(&server)).await;
        let response = client
            .get("/api/search?job_title=%20nurse%20&location=Leeds")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["job_title"], "nurse");
        assert_eq!(body["data"]["search"]["total_count"], 1);
        assert_eq!(body["data"]["search"]["listings"][0]["company"], "NHS Trust");
        assert_eq!(body["data"]["market_summary"]["error"], false);
        assert_eq!(
            body["data"]["market_summary"]["summary"],
            "Nursing demand is high."
        );
    }

    #[rocket::async_test]
    async fn test_empty_search_skips_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with(configured(&server)).await;
        let response = client
            .get("/api/search?job_title=astronaut&location=Slough")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert!(body["data"].get("market_summary").is_none());
    }

    #[rocket::async_test]
    async fn test_describe_without_credentials() {
        let client = client_with(AppConfig::default()).await;
        let response = client
            .post("/api/describe")
            .json(&json!({"description": "Lead the platform team."}))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["message"], "AI summary service not available.");
    }
}
