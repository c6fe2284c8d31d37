//! One-shot notifications carried across a redirect in the session.

use tower_sessions::Session;

use order_desk_core::Notification;

use crate::error::AppError;
use crate::models::session_keys;

/// Queue `notification` for the next rendered page, replacing any pending one.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be written.
pub async fn push(session: &Session, notification: &Notification) -> Result<(), AppError> {
    session
        .insert(session_keys::NOTIFICATION, notification)
        .await?;
    Ok(())
}

/// Remove and return the pending notification.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be read.
pub async fn take(session: &Session) -> Result<Option<Notification>, AppError> {
    Ok(session
        .remove::<Notification>(session_keys::NOTIFICATION)
        .await?)
}
