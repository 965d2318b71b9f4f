//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Preferences, Session, TimerPhase};

/// Session fields plus the values a front-end renders from them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub progress: f64,
    pub formatted_time: String,
    pub title: String,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            progress: session.progress(),
            formatted_time: session.formatted_time(),
            title: session.menubar_title(),
            session,
        }
    }
}

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionView,
}

impl ApiResponse {
    /// Create a response describing `session` after a command
    pub fn new(message: String, session: Session) -> Self {
        Self {
            status: run_status(&session).to_string(),
            message,
            timestamp: Utc::now(),
            session: session.into(),
        }
    }
}

/// `"idle"`, `"running"` or `"paused"`
pub fn run_status(session: &Session) -> &'static str {
    match (session.state, session.is_running) {
        (TimerPhase::Idle, _) => "idle",
        (_, true) => "running",
        (_, false) => "paused",
    }
}

/// Status response with the full session and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub session: SessionView,
    pub preferences: Preferences,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
