//! Operator-facing notifications and confirmation prompts.
//!
//! Failure messages are generic and never carry the underlying store error.

use serde::{Deserialize, Serialize};

use crate::types::OrderStatus;

/// Severity of a notification, which selects its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Icon/style key (`"success"`, `"warning"`, `"error"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A toast shown after a workflow finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Build a notification.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    /// The store accepted a status change.
    #[must_use]
    pub fn status_updated(status: OrderStatus) -> Self {
        Self::new(
            status.title(),
            format!("The order status has been updated to {status}."),
            Severity::Success,
        )
    }

    /// The store rejected a status change.
    #[must_use]
    pub fn status_update_failed() -> Self {
        Self::new(
            "Error!",
            "Something went wrong while updating the status.",
            Severity::Error,
        )
    }

    /// The store deleted an order.
    #[must_use]
    pub fn order_deleted() -> Self {
        Self::new("Deleted!", "Your order has been deleted.", Severity::Success)
    }

    /// The store rejected a deletion.
    #[must_use]
    pub fn delete_failed() -> Self {
        Self::new(
            "Error!",
            "Something went wrong while deleting.",
            Severity::Error,
        )
    }

    /// The order list was refreshed from the store.
    #[must_use]
    pub fn orders_reloaded(count: usize) -> Self {
        let noun = if count == 1 { "order" } else { "orders" };
        Self::new(
            "Reloaded",
            format!("Loaded {count} {noun} from the store."),
            Severity::Success,
        )
    }

    /// Refreshing the order list failed.
    #[must_use]
    pub fn reload_failed() -> Self {
        Self::new(
            "Error!",
            "Something went wrong while loading orders.",
            Severity::Error,
        )
    }
}

/// The operator's answer to a [`ConfirmPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confirmation {
    #[serde(rename = "confirm")]
    Confirmed,
    #[serde(rename = "cancel")]
    Cancelled,
}

impl Confirmation {
    /// Whether the operator affirmed.
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// A modal asking the operator to affirm a destructive action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    /// Prompt shown before deleting an order.
    #[must_use]
    pub fn delete_order() -> Self {
        Self {
            title: "Are you sure?".to_owned(),
            body: "You won't be able to revert this!".to_owned(),
            severity: Severity::Warning,
            confirm_label: "Yes, delete it!".to_owned(),
            cancel_label: "Cancel".to_owned(),
        }
    }
}
