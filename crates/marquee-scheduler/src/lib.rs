//! Job engine for Marquee.
//!
//! This crate provides:
//! - Job kinds, a job factory and the `CheckWeekReleases` job
//! - A shared catalog cache populated at most once per run
//! - Notification payloads for detected releases
//! - A bounded worker pool and an in-order result drain

mod cache;
mod context;
mod error;
mod image;
mod job;
mod payload;
mod pool;
mod result;
mod types;

#[cfg(test)]
mod testing;

pub use cache::{AuxData, AuxDataCache};
pub use context::JobContext;
pub use error::SchedulerError;
pub use image::{movie_display_image, select_display_image};
pub use job::{CheckWeekReleases, Job};
pub use payload::{NotificationPayload, build_payload};
pub use pool::{
    DEFAULT_WORKER_COUNT, JOB_QUEUE_CAPACITY, RESULT_QUEUE_CAPACITY, WorkerPool, drain,
    run_pipeline,
};
pub use result::{CheckWeekReleasesResult, JobResult};
pub use types::{JobFactory, JobKind, Today, is_today};
