//! Job kinds, job ids and the reference day.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Local, NaiveDate};

use crate::{CheckWeekReleases, Job, SchedulerError};

/// The kinds of job that can be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Detect movies releasing today in a theater.
    WeekReleases,
}

impl JobKind {
    /// Every registered job kind.
    pub fn all() -> &'static [JobKind] {
        &[JobKind::WeekReleases]
    }

    /// Name used on the command line and in job names.
    pub fn name(&self) -> &'static str {
        match self {
            JobKind::WeekReleases => "week_releases",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            JobKind::WeekReleases => "Check for releases in the current week",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobKind {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SchedulerError::UnknownJob(s.to_string()))
    }
}

/// Creates jobs with process-unique, monotonically increasing ids.
#[derive(Debug, Default)]
pub struct JobFactory {
    next_id: AtomicU64,
}

impl JobFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a job of the given kind targeting a theater.
    pub fn create(&self, kind: JobKind, theater_id: impl Into<String>) -> Job {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        match kind {
            JobKind::WeekReleases => Job::CheckWeekReleases(CheckWeekReleases {
                id,
                theater_id: theater_id.into(),
            }),
        }
    }

    /// Number of jobs created so far.
    pub fn created(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }
}

/// The calendar day a run checks releases against.
///
/// Fixed once when the run starts; jobs never re-read the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today(NaiveDate);

impl Today {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current local date.
    pub fn now() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Weekday number, 0 = Sunday through 6 = Saturday.
    ///
    /// Follows the run's reference day, so `--date` also shifts the display image.
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }
}

/// Whether a release date falls on the same day, month and year as `today`.
pub fn is_today(release_date: Option<NaiveDate>, today: Today) -> bool {
    let Some(date) = release_date else {
        return false;
    };
    let today = today.date();
    date.day() == today.day() && date.month() == today.month() && date.year() == today.year()
}
