//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Operator credential verification (argon2)
//! - `orders` - Order list state and the status change / delete workflows

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService, hash_password};
pub use orders::{LoadState, MutationOutcome, OrderDesk};
