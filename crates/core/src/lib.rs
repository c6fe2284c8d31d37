//! Order Desk Core - Shared types library.
//!
//! This crate provides the order domain used by every Order Desk component:
//! - `admin` - Operator web interface over the document store
//! - `cli` - Command-line tools for credentials and order maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP clients, no locking. Every mutation of [`OrderList`] here is a local
//! reconciliation step; callers decide when the remote store has acknowledged.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for order IDs, statuses, emails and money
//! - [`order`] - The order record and its cart line items
//! - [`list`] - Order list state and the status filter view
//! - [`selection`] - Single-selection detail toggle
//! - [`notification`] - Operator notifications and confirmation prompts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod list;
pub mod notification;
pub mod order;
pub mod selection;
pub mod types;

pub use list::OrderList;
pub use notification::{ConfirmPrompt, Confirmation, Notification, Severity};
pub use order::{CartItem, Contact, CustomerName, Order, ProductLine, ShippingAddress};
pub use selection::DetailToggle;
pub use types::*;
