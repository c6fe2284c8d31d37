//! Session-related types for operator authentication.
//!
//! Types stored in the session for authentication and page state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use order_desk_core::Email;

/// Session-stored operator identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Operator's email address.
    pub email: Email,
    /// When the operator logged in.
    pub logged_in_at: DateTime<Utc>,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in operator.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the order detail toggle.
    pub const EXPANDED_ORDER: &str = "expanded_order";

    /// Key for the one-shot notification shown on the next page.
    pub const NOTIFICATION: &str = "notification";
}
