use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_sight::{start_web_server, AppConfig, JobSearchClient, MarketSummaryClient};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobsight")]
#[command(about = "Job search with AI market summaries")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search once and print the results as JSON
    Search {
        job_title: String,
        location: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Also request a market summary
        #[arg(long)]
        summary: bool,
    },
    /// Summarize a job description read from the argument or stdin
    Describe { text: Option<String> },
    /// List the provider's job categories
    Categories,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("job_sight=info,jobsight=info,rocket::server=off"));

    // Logs go to stderr so command output on stdout stays valid JSON.
    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            start_web_server(config).await
        }
        Command::Search {
            job_title,
            location,
            page,
            summary,
        } => {
            let job_title = job_title.trim();
            let location = location.trim();
            let jobs = JobSearchClient::new(config.job_search.clone())?;
            let result = jobs.search_page(job_title, location, page).await;

            let market_summary = if summary && !result.is_error() && !result.listings.is_empty() {
                let summaries = MarketSummaryClient::new(config.market_summary.clone())?;
                Some(
                    summaries
                        .summarize(job_title, location, &result.listings)
                        .await,
                )
            } else {
                None
            };

            print_json(&serde_json::json!({
                "search": result,
                "market_summary": market_summary,
            }))
        }
        Command::Describe { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read description from stdin")?;
                    buffer
                }
            };
            let summaries = MarketSummaryClient::new(config.market_summary.clone())?;
            let summary = summaries.summarize_description(text.trim()).await;
            println!("{}", summary);
            Ok(())
        }
        Command::Categories => {
            let jobs = JobSearchClient::new(config.job_search.clone())?;
            let categories = jobs.categories().await;
            info!("Fetched {} categories", categories.len());
            print_json(&categories)
        }
    }
}
