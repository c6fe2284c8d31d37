//! Sanity content lake integration.
//!
//! Orders live as `order` documents in a Sanity dataset. This module provides:
//! - [`SanityClient`], the production [`crate::store::DocumentStore`]
//! - Wire types for the query and mutate endpoints
//! - Conversions from documents to [`order_desk_core::Order`]
//!
//! # Example
//!
//! ```rust,ignore
//! use order_desk_admin::sanity::SanityClient;
//! use order_desk_admin::store::DocumentStore;
//!
//! let client = SanityClient::new(&config.sanity)?;
//! let orders = client.fetch_orders().await?;
//! ```

mod client;
mod conversions;
pub mod queries;
mod types;

pub use client::SanityClient;
pub use conversions::{AssetUrls, FALLBACK_IMAGE, convert_orders};
