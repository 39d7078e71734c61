//! Push notification gateway client for Marquee.
//!
//! Notifications are addressed to topics (one per theater) and delivered
//! through Firebase Cloud Messaging's legacy HTTP endpoint.

mod error;
mod fcm;
mod notification;

pub use error::PushError;
pub use fcm::{
    AUTH_KEY_PLACEHOLDER, DEFAULT_ENDPOINT, FcmClient, MAX_TTL, MIN_TTL, PushGateway,
    validate_auth_key,
};
pub use notification::{Action, Notification, theater_topic};
