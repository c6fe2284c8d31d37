//! Core types for Order Desk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::OrderId;
pub use money::{Money, MoneyError};
pub use status::{OrderStatus, StatusFilter, StatusParseError};
