//! Run modes: a single theater inline, or every theater through the pool.

use std::sync::Arc;

use chrono::NaiveDate;
use miette::Result;
use tracing::{info, warn};

use marquee_push::validate_auth_key;
use marquee_scheduler::{JobContext, JobFactory, JobKind, Today, run_pipeline};

/// Which theaters a run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Theater(String),
    AllTheaters,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub kind: JobKind,
    pub target: Target,
    pub workers: usize,
    pub notify: bool,
    pub today: Today,
}

impl RunConfig {
    /// Validate command-line input. Every error here is fatal before any job runs.
    pub fn from_args(
        job: Option<&str>,
        theater_id: Option<String>,
        all_theaters: bool,
        workers: usize,
        notify: bool,
        fcm_auth_key: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Self> {
        let job = job.ok_or_else(|| miette::miette!("missing job"))?;
        let kind = match job.parse::<JobKind>() {
            Ok(kind) => kind,
            Err(e) => {
                print_jobs();
                return Err(miette::miette!("job '{}' is not valid: {}", job, e));
            }
        };

        if notify {
            validate_auth_key(fcm_auth_key)
                .map_err(|_| miette::miette!("notify was set, but FCM auth key is missing"))?;
        }

        let target = if all_theaters {
            Target::AllTheaters
        } else {
            match theater_id.filter(|id| !id.is_empty()) {
                Some(id) => Target::Theater(id),
                None => return Err(miette::miette!("missing target theater")),
            }
        };

        let today = date.map(Today::new).unwrap_or_else(Today::now);

        Ok(Self {
            kind,
            target,
            workers,
            notify,
            today,
        })
    }
}

/// Print information about every job that can be run.
pub fn print_jobs() {
    println!("\nAvailable jobs:");
    for kind in JobKind::all() {
        println!("\t{}\t {}", kind, kind.description());
    }
    println!();
}

/// Execute the configured run.
pub async fn run(config: &RunConfig, ctx: Arc<JobContext>) -> Result<()> {
    let factory = JobFactory::new();
    info!(job = %config.kind, date = %config.today.date(), notify = config.notify, "starting run");

    match &config.target {
        Target::Theater(theater_id) => {
            let job = factory.create(config.kind, theater_id.clone());
            match job.run(&ctx, config.notify).await {
                Some(result) => info!(job = %result.job_name(), "job finished"),
                None => warn!(theater_id = %theater_id, "job produced no result"),
            }
        }
        Target::AllTheaters => {
            let theaters = ctx
                .catalog
                .list_theaters()
                .await
                .map_err(|e| miette::miette!("failed to list theaters: {}", e))?;

            let jobs = theaters
                .iter()
                .map(|theater| factory.create(config.kind, theater.id.to_string()))
                .collect();

            let finished = run_pipeline(Arc::clone(&ctx), jobs, config.workers, config.notify)
                .await
                .map_err(|e| miette::miette!("{}", e))?;

            info!(
                theaters = theaters.len(),
                finished = finished.len(),
                "run complete"
            );
        }
    }

    Ok(())
}
