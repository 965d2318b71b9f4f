//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};

use crate::state::{AppState, TimerManager, TimerPhase};
use super::responses::{run_status, ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let session = state.run_command("start", TimerManager::start);
    Json(ApiResponse::new(
        format!("{} running", session.state),
        session,
    ))
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let session = state.run_command("pause", TimerManager::pause);
    let message = if session.state == TimerPhase::Idle {
        "Timer not started".to_string()
    } else {
        format!("{} paused at {}", session.state, session.formatted_time())
    };
    Json(ApiResponse::new(message, session))
}

/// Handle POST /skip - Move straight to the next phase
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let session = state.run_command("skip", TimerManager::skip);
    Json(ApiResponse::new(
        format!("Skipped to {}", session.state),
        session,
    ))
}

/// Handle POST /reset - Abandon the cycle and return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let session = state.run_command("reset", TimerManager::reset);
    Json(ApiResponse::new("Timer reset".to_string(), session))
}

/// Handle GET /status - Return the current session and server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.manager.current_session();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        status: run_status(&session).to_string(),
        session: session.into(),
        preferences: state.preferences.clone(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
