//! Notification envelope and tap actions.

use serde::{Deserialize, Serialize};

use crate::PushError;

/// An outbound message addressed to a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub topic: String,
    pub data: serde_json::Value,
}

impl Notification {
    /// Build a notification from any serializable payload.
    pub fn new(topic: impl Into<String>, payload: &impl Serialize) -> Result<Self, PushError> {
        Ok(Self {
            topic: topic.into(),
            data: serde_json::to_value(payload)?,
        })
    }
}

/// Topic that subscribers of a theater listen on.
pub fn theater_topic(theater_id: impl std::fmt::Display) -> String {
    format!("theater_{}", theater_id)
}

/// An action the receiving device offers alongside the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Open the movie's detail screen.
    MovieDetails { movie_id: i64 },
    /// Play the movie's trailer.
    ViewTrailer { video_id: String },
}

impl Action {
    pub fn movie_details(movie_id: i64) -> Self {
        Self::MovieDetails { movie_id }
    }

    pub fn view_trailer(video_id: impl Into<String>) -> Self {
        Self::ViewTrailer {
            video_id: video_id.into(),
        }
    }

    /// Wire name of the action type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MovieDetails { .. } => "movie_details",
            Self::ViewTrailer { .. } => "view_trailer",
        }
    }
}
