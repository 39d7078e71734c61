//! Error types for the job engine.

use thiserror::Error;

/// Errors that can occur while building or running jobs.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Catalog service error.
    #[error("catalog error: {0}")]
    Catalog(#[from] marquee_catalog::CatalogError),

    /// Push gateway error.
    #[error("push error: {0}")]
    Push(#[from] marquee_push::PushError),

    /// Job input was rejected before running.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No job is registered under this name.
    #[error("unknown job: {0}")]
    UnknownJob(String),

    /// A pipeline task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
