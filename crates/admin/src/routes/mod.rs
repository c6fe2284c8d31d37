//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (503 while orders are not loaded)
//! GET  /                       - Redirect to /orders
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Verify credentials
//! POST /auth/logout            - Logout
//!
//! # Orders
//! GET  /orders?status=         - Order table with filter tabs
//! POST /orders/reload          - Re-fetch from the store
//! POST /orders/{id}/status     - Change status
//! POST /orders/{id}/toggle     - Expand or collapse detail
//! GET  /orders/{id}/delete     - Delete confirmation
//! POST /orders/{id}/delete     - Delete (confirm or cancel)
//!
//! # Assets
//! GET  /static/*               - CSS, JS, fallback image
//! ```

pub mod auth;
pub mod flash;
pub mod health;
pub mod orders;

use askama::Template;
use axum::{
    Router,
    middleware::from_fn,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Render a template, turning failures into a 500.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/orders") }))
        .merge(auth::router())
        .merge(orders::router())
}

/// Build the full application: routes, probes, static files and middleware.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)]
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
