//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{constants::VERSION, overlay::OverlayStatus, state::TimerSnapshot};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response; `status` mirrors the timer state
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: timer.state.as_str().to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Body for PUT /durations. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationsRequest {
    pub focus_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
}

/// Status response with timer and overlay information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub overlay: OverlayStatus,
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
            version: VERSION.to_string(),
        }
    }
}
