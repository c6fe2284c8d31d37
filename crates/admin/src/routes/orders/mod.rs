//! Orders management route handlers.
//!
//! This module contains handlers for the order list, the detail toggle, the
//! status change and delete workflows, and explicit reload.

mod actions;
mod list;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub use actions::{ConfirmDeleteTemplate, confirm_delete, delete, update_status};
pub use list::{OrdersIndexTemplate, index, reload, toggle};
pub use types::{CartItemView, NotificationView, OrderRowView, OrdersQuery};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/reload", post(reload))
        .route("/orders/{id}/status", post(update_status))
        .route("/orders/{id}/toggle", post(toggle))
        .route("/orders/{id}/delete", get(confirm_delete).post(delete))
}
