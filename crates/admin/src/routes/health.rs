//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode};

use crate::services::LoadState;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until orders have loaded, and whenever the
/// most recent load failed.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.orders().load_state().await {
        LoadState::Ready { .. } => StatusCode::OK,
        LoadState::Pending | LoadState::Degraded { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}
