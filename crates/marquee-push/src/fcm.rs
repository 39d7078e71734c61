//! FCM HTTP gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{Notification, PushError};

/// Minimum value for the FCM time-to-live field.
pub const MIN_TTL: u32 = 0;

/// Maximum time a notification stays deliverable: one week, in seconds.
pub const MAX_TTL: u32 = 86_400 * 7;

/// Legacy FCM send endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Value shipped in example configs in place of a real key.
pub const AUTH_KEY_PLACEHOLDER: &str = "YOUR_FCM_AUTH_KEY";

/// Half a week, so a notification sent on Thursday still reaches devices before Monday.
const NOTIFICATION_TTL: u32 = MAX_TTL / 2;

/// Delivers notifications to topic subscribers.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send a notification. Returns whether the gateway accepted it.
    async fn send(&self, notification: &Notification) -> Result<bool, PushError>;
}

/// Check that an auth key is usable before any job runs.
pub fn validate_auth_key(key: Option<&str>) -> Result<&str, PushError> {
    match key.map(str::trim) {
        Some(key) if !key.is_empty() && key != AUTH_KEY_PLACEHOLDER => Ok(key),
        _ => Err(PushError::AuthKeyNotDefined),
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: String,
    data: &'a serde_json::Value,
    #[serde(rename = "time-to-live")]
    time_to_live: u32,
}

/// Client for the FCM send endpoint.
pub struct FcmClient {
    http: Client,
    endpoint: String,
    auth_key: Option<String>,
}

impl FcmClient {
    /// Create a client posting to `endpoint` with the given server key.
    pub fn new(endpoint: impl Into<String>, auth_key: Option<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            auth_key,
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushGateway for FcmClient {
    async fn send(&self, notification: &Notification) -> Result<bool, PushError> {
        let auth_key = match self.auth_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(PushError::AuthKeyNotDefined),
        };
        if notification.data.is_null() {
            return Err(PushError::InvalidNotification);
        }

        let body = SendRequest {
            to: format!("/topics/{}", notification.topic),
            data: &notification.data,
            time_to_live: NOTIFICATION_TTL,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", auth_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!(topic = %notification.topic, status = %status, "FCM responded");

        Ok(status.is_success())
    }
}
