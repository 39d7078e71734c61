//! Jobs and the week-releases check.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::{CheckWeekReleasesResult, JobContext, JobKind, JobResult, SchedulerError, is_today};

/// A unit of scheduled work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    CheckWeekReleases(CheckWeekReleases),
}

impl Job {
    pub fn id(&self) -> u64 {
        match self {
            Job::CheckWeekReleases(job) => job.id,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            Job::CheckWeekReleases(_) => JobKind::WeekReleases,
        }
    }

    pub fn theater_id(&self) -> &str {
        match self {
            Job::CheckWeekReleases(job) => &job.theater_id,
        }
    }

    /// Run the job, optionally sending its notification.
    ///
    /// Returns `None` when the job aborted; the failure has been logged.
    pub async fn run(&self, ctx: &JobContext, notify: bool) -> Option<JobResult> {
        match self {
            Job::CheckWeekReleases(job) => job
                .run(ctx, notify)
                .await
                .map(JobResult::CheckWeekReleases),
        }
    }
}

/// Finds the movies a theater is releasing today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckWeekReleases {
    pub id: u64,
    pub theater_id: String,
}

impl CheckWeekReleases {
    pub async fn run(&self, ctx: &JobContext, notify: bool) -> Option<CheckWeekReleasesResult> {
        let result = match self.check(ctx).await {
            Ok(result) => result,
            Err(e) => {
                warn!(job_id = self.id, theater_id = %self.theater_id, error = %e, "job aborted");
                return None;
            }
        };

        if notify {
            result.notify(ctx).await;
        }

        Some(result)
    }

    async fn check(&self, ctx: &JobContext) -> Result<CheckWeekReleasesResult, SchedulerError> {
        if self.theater_id.is_empty() {
            return Err(SchedulerError::InvalidInput("empty theater id".to_string()));
        }

        info!(
            job_id = self.id,
            theater_id = %self.theater_id,
            "running {}",
            JobKind::WeekReleases
        );

        let aux = ctx.cache.ensure_populated().await;
        debug!(job_id = self.id, "aux data ready");

        let schedule = ctx.catalog.get_schedule(&self.theater_id).await?;

        let mut releasing: HashMap<i64, bool> = HashMap::new();
        for session in &schedule.sessions {
            releasing.entry(session.movie.id).or_insert_with(|| {
                aux.movie(session.movie.id)
                    .is_some_and(|movie| is_today(movie.release_date, ctx.today))
            });
        }

        let week_releases = releasing
            .into_iter()
            .filter(|(_, release)| *release)
            .filter_map(|(id, _)| aux.movie(id).cloned())
            .collect();

        let theater = self
            .theater_id
            .parse::<i64>()
            .ok()
            .and_then(|id| aux.theater(id).cloned());

        Ok(CheckWeekReleasesResult {
            job: self.clone(),
            theater,
            week_releases,
        })
    }
}
