//! Job results and notification delivery.

use tracing::{error, info};

use marquee_catalog::{Movie, Theater};
use marquee_push::{Notification, theater_topic};

use crate::{CheckWeekReleases, JobContext, JobKind, NotificationPayload, build_payload};

/// The outcome of a completed job.
#[derive(Debug, Clone)]
pub enum JobResult {
    CheckWeekReleases(CheckWeekReleasesResult),
}

impl JobResult {
    /// Name used when reporting completion, e.g. `"4 (week_releases)"`.
    pub fn job_name(&self) -> String {
        match self {
            JobResult::CheckWeekReleases(result) => result.job_name(),
        }
    }

    /// Send this result's notification. Returns true if delivered or nothing to send.
    pub async fn notify(&self, ctx: &JobContext) -> bool {
        match self {
            JobResult::CheckWeekReleases(result) => result.notify(ctx).await,
        }
    }
}

/// Movies a theater releases today.
#[derive(Debug, Clone)]
pub struct CheckWeekReleasesResult {
    pub job: CheckWeekReleases,
    /// Theater view from the cache, absent if the cache does not know it.
    pub theater: Option<Theater>,
    /// Releases in no particular order; may be empty.
    pub week_releases: Vec<Movie>,
}

impl CheckWeekReleasesResult {
    pub fn job_name(&self) -> String {
        format!("{} ({})", self.job.id, JobKind::WeekReleases)
    }

    /// Topic the theater's subscribers listen on.
    pub fn topic(&self) -> String {
        match &self.theater {
            Some(theater) => theater_topic(theater.id),
            None => theater_topic(&self.job.theater_id),
        }
    }

    pub fn payload(&self, weekday: usize) -> Option<NotificationPayload> {
        build_payload(self.theater.as_ref(), &self.week_releases, weekday)
    }

    /// Deliver the release notification, if there is anything to announce.
    ///
    /// Delivery failures are logged and reported as `false`; there are no retries.
    pub async fn notify(&self, ctx: &JobContext) -> bool {
        let Some(payload) = self.payload(ctx.today.weekday_index()) else {
            return true;
        };

        let notification = match Notification::new(self.topic(), &payload) {
            Ok(notification) => notification,
            Err(e) => {
                error!(job = %self.job_name(), error = %e, "failed to build notification");
                return false;
            }
        };

        match ctx.push.send(&notification).await {
            Ok(sent) => {
                info!(job = %self.job_name(), topic = %notification.topic, sent, "notification sent");
                sent
            }
            Err(e) => {
                error!(job = %self.job_name(), topic = %notification.topic, error = %e, "failed to send notification");
                false
            }
        }
    }
}
