//! The order record as cached from the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Money, OrderId, OrderStatus};

/// Customer name as entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName {
    pub first: String,
    pub last: String,
}

impl CustomerName {
    /// `"First Last"`, without stray spaces when either part is missing.
    #[must_use]
    pub fn full(&self) -> String {
        match (self.first.trim(), self.last.trim()) {
            ("", "") => String::new(),
            (first, "") => first.to_owned(),
            ("", last) => last.to_owned(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

/// How to reach the customer.
///
/// Kept as free text: the store accepts whatever checkout submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

/// Shipping destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// A resolved product line in an order's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Product name, if the product document has one.
    pub product_name: Option<String>,
    /// Displayable image URL (already resolved, fallback applied).
    pub image_url: String,
}

/// One entry of an order's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartItem {
    /// A product that resolved at query time.
    Product(ProductLine),
    /// A null entry, a dangling reference, or a malformed record.
    Invalid,
}

impl CartItem {
    /// Whether this entry should render as a placeholder.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerName,
    pub contact: Contact,
    pub shipping: ShippingAddress,
    pub total: Money,
    /// When the order was placed, if the store value could be parsed.
    pub ordered_at: Option<DateTime<Utc>>,
    /// `None` when the store holds no status or one outside [`OrderStatus`].
    pub status: Option<OrderStatus>,
    pub cart_items: Vec<CartItem>,
}
