//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    overlay::OverlayStatus,
    state::{AppState, TimerSnapshot},
    utils::time_format::{format_time, format_time_human_readable},
};
use super::responses::{ApiResponse, DurationsRequest, HealthResponse, StatusResponse};

fn respond(
    action: &str,
    result: Result<TimerSnapshot, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            let message = format!(
                "{}: {} ({})",
                timer.status_text,
                timer.display,
                format_time_human_readable(timer.remaining_seconds as i64)
            );
            info!("{} endpoint called - timer {}", action, timer.state);
            Ok(Json(ApiResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Begin or resume the focus countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start())
}

/// Handle POST /stop - Pause focus or abandon a break
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("stop", state.stop())
}

/// Handle POST /reset - Return to idle with full counters
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset())
}

/// Handle POST /toggle - Stop while counting down, otherwise start
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("toggle", state.toggle())
}

/// Handle PUT /durations - Change focus and/or break minutes (clamped)
pub async fn durations_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationsRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        "durations",
        state.set_durations(request.focus_minutes, request.break_minutes),
    )
}

/// Handle GET /status - Timer, overlay and server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.get_timer_snapshot().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let overlay = state.get_overlay_status().map_err(|e| {
        error!("Failed to get overlay state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let (last_action, last_action_time) = state.get_last_action();

    info!("Status requested - {} {}", timer.state, format_time(timer.remaining_seconds as i64));

    Ok(Json(StatusResponse {
        timer,
        overlay,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /overlay - Per-display overlay state
pub async fn overlay_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OverlayStatus>, StatusCode> {
    state.get_overlay_status().map(Json).map_err(|e| {
        error!("Failed to get overlay state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
