//! Type definitions and conversions for order views.

use serde::Deserialize;

use order_desk_core::{
    CartItem, Confirmation, Notification, Order, OrderId, OrderStatus, StatusFilter,
};

use crate::error::AppError;

/// Shown when a cart entry could not be read.
pub const INVALID_ITEM_LABEL: &str = "Invalid Item";
/// Shown for a product without a name.
pub const UNKNOWN_PRODUCT_LABEL: &str = "Unknown Product";
/// Shown for an order with an empty cart.
pub const NO_ITEMS_LABEL: &str = "No items available";

// =============================================================================
// Query Parameters and Forms
// =============================================================================

/// Query parameters for the orders list.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// `All`, `pending`, `dispatch` or `success`.
    pub status: Option<String>,
}

impl OrdersQuery {
    /// The requested filter, `All` when absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for any other value.
    pub fn filter(&self) -> Result<StatusFilter, AppError> {
        parse_filter(self.status.as_deref())
    }
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
    /// Filter to return to.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Detail toggle and reload forms; only carry the filter to return to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub filter: Option<String>,
}

/// Delete confirmation answer.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub choice: Confirmation,
    #[serde(default)]
    pub filter: Option<String>,
}

/// Parse a filter value from a query string or hidden field.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for values other than `All` or a status.
pub fn parse_filter(raw: Option<&str>) -> Result<StatusFilter, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(StatusFilter::All),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("unknown status filter '{value}'"))),
    }
}

/// List URL for `filter`.
#[must_use]
pub fn orders_path(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "/orders".to_string(),
        StatusFilter::Only(status) => format!("/orders?status={status}"),
    }
}

/// Base URL of one order's actions, with the ID percent-encoded.
#[must_use]
pub fn order_path(id: &OrderId) -> String {
    format!("/orders/{}", urlencoding::encode(id.as_str()))
}

// =============================================================================
// View Types
// =============================================================================

/// A filter tab above the table.
#[derive(Debug, Clone)]
pub struct FilterTabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl FilterTabView {
    /// Every tab, with `current` marked active.
    #[must_use]
    pub fn all(current: StatusFilter) -> Vec<Self> {
        StatusFilter::TABS
            .into_iter()
            .map(|tab| Self {
                label: tab.label(),
                href: orders_path(tab),
                active: tab == current,
            })
            .collect()
    }
}

/// One `<option>` of the status select.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// A cart entry in the expanded detail.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub invalid: bool,
    pub name: String,
    pub image_url: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        match item {
            CartItem::Invalid => Self {
                invalid: true,
                name: INVALID_ITEM_LABEL.to_string(),
                image_url: String::new(),
            },
            CartItem::Product(line) => Self {
                invalid: false,
                name: line
                    .product_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_PRODUCT_LABEL.to_string()),
                image_url: line.image_url.clone(),
            },
        }
    }
}

/// An order row, with its detail when expanded.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    /// `/orders/{id}` with the ID encoded, for action URLs.
    pub path: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub total: String,
    pub ordered_at: String,
    /// The store holds no usable status; the select shows a disabled placeholder.
    pub status_unset: bool,
    pub status_options: Vec<StatusOptionView>,
    pub expanded: bool,
    pub items: Vec<CartItemView>,
}

impl OrderRowView {
    #[must_use]
    pub fn new(order: &Order, expanded: bool) -> Self {
        let status_options = OrderStatus::ALL
            .into_iter()
            .map(|status| StatusOptionView {
                value: status.as_str(),
                label: status.label(),
                selected: order.status == Some(status),
            })
            .collect();

        Self {
            id: order.id.to_string(),
            path: order_path(&order.id),
            customer_name: order.customer.full(),
            phone: order.contact.phone.clone(),
            email: order.contact.email.clone(),
            street: order.shipping.street.clone(),
            city: order.shipping.city.clone(),
            zip: order.shipping.zip.clone(),
            total: order.total.to_string(),
            ordered_at: order.ordered_at.map_or_else(
                || "Unknown".to_string(),
                |at| at.format("%Y-%m-%d %H:%M").to_string(),
            ),
            status_unset: order.status.is_none(),
            status_options,
            expanded,
            items: order.cart_items.iter().map(CartItemView::from).collect(),
        }
    }
}

/// A toast.
#[derive(Debug, Clone)]
pub struct NotificationView {
    pub title: String,
    pub message: String,
    pub severity: &'static str,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        Self {
            title: n.title,
            message: n.message,
            severity: n.severity.as_str(),
        }
    }
}
