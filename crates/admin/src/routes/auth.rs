//! Authentication route handlers for admin.
//!
//! Email and password login for the single operator account.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::render;

/// Login page template.
#[derive(Template, Default)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    /// Inline alert shown above the form.
    pub error: Option<String>,
    /// Previously submitted email, echoed back on failure.
    pub email: String,
}

/// Login form submission.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/orders").into_response();
    }
    render(&LoginPageTemplate::default())
}

/// Verify credentials and start a session.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Ok(email) = state.auth().verify(&form.email, &form.password) else {
        warn!("Failed login attempt");
        let page = LoginPageTemplate {
            error: Some("Invalid email or password".to_string()),
            email: form.email,
        };
        return Ok((StatusCode::UNAUTHORIZED, render(&page)).into_response());
    };

    let admin = CurrentAdmin {
        email,
        logged_in_at: Utc::now(),
    };
    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.email.as_str());
    info!("Operator logged in");

    Ok(Redirect::to("/orders").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_current_admin(&session).await;
    clear_sentry_user();

    Redirect::to("/auth/login")
}
