//! Marquee: theater release notifier
//!
//! Checks each theater's schedule for movies releasing today and pushes
//! one notification per theater to its subscribers.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_catalog::CatalogClient;
use marquee_push::{AUTH_KEY_PLACEHOLDER, DEFAULT_ENDPOINT, FcmClient};
use marquee_scheduler::{DEFAULT_WORKER_COUNT, JobContext};

mod runner;

use runner::RunConfig;

/// Value parser for `--notify` / `MARQUEE_NOTIFY`; an empty value means off.
fn parse_bool_env(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("--notify expects on/off style values, got '{}'", other)),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date format. expected YYYY-MM-DD, but got {}", s))
}

#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "Checks theater listings for today's releases", long_about = None)]
struct Cli {
    /// Which job to run
    #[arg(long, value_name = "NAME", required_unless_present = "list_jobs")]
    job: Option<String>,

    /// Target theater id for a single job
    #[arg(long)]
    id: Option<String>,

    /// Run the job for every theater in the catalog
    #[arg(long)]
    all_theaters: bool,

    /// How many workers to allocate
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Send notifications for detected releases.
    /// Accepts "1", "true", "yes", or "on".
    #[arg(
        long,
        env = "MARQUEE_NOTIFY",
        value_parser = parse_bool_env,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    notify: bool,

    /// FCM server key used to send notifications
    #[arg(long, env = "MARQUEE_FCM_AUTH_KEY", default_value = AUTH_KEY_PLACEHOLDER, hide_env_values = true)]
    fcm_auth_key: String,

    /// FCM send endpoint
    #[arg(long, env = "MARQUEE_FCM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    fcm_endpoint: String,

    /// Catalog service base URL
    #[arg(long, env = "MARQUEE_CATALOG_URL", required_unless_present = "list_jobs")]
    catalog_url: Option<String>,

    /// Which date to check (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Print the available jobs and exit
    #[arg(long)]
    list_jobs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "marquee=info,marquee_scheduler=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if cli.list_jobs {
        runner::print_jobs();
        return Ok(());
    }

    let config = RunConfig::from_args(
        cli.job.as_deref(),
        cli.id,
        cli.all_theaters,
        cli.workers,
        cli.notify,
        Some(cli.fcm_auth_key.as_str()),
        cli.date,
    )?;

    let catalog_url = cli
        .catalog_url
        .ok_or_else(|| miette::miette!("missing catalog URL"))?;
    let catalog = Arc::new(CatalogClient::new(catalog_url));
    let push = Arc::new(FcmClient::new(cli.fcm_endpoint, Some(cli.fcm_auth_key)));
    let ctx = Arc::new(JobContext::new(catalog, push, config.today));

    runner::run(&config, ctx).await
}
