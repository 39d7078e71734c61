//! Error types for the push gateway.

use thiserror::Error;

/// Errors that can occur when delivering a notification.
#[derive(Debug, Error)]
pub enum PushError {
    /// No authentication key configured.
    #[error("FCM auth key not defined")]
    AuthKeyNotDefined,

    /// Notification is missing its payload.
    #[error("notification is invalid")]
    InvalidNotification,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
