//! Document store abstraction for orders.
//!
//! The admin panel never owns order data: it reads and mutates documents in a
//! remote store. [`DocumentStore`] is the narrow seam between the order
//! workflows and that store, implemented by [`crate::sanity::SanityClient`]
//! for production and by [`InMemoryStore`] for tests and local development.

mod memory;

pub use memory::{InMemoryStore, StoreCall};

use async_trait::async_trait;
use thiserror::Error;

use order_desk_core::{Order, OrderId, OrderStatus};

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned {status}: {description}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description from the response body.
        description: String,
    },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built from configuration.
    #[error("invalid store URL: {0}")]
    Url(#[from] url::ParseError),

    /// Store is unreachable or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Remote collection of order documents.
///
/// Every method is a single remote round trip; callers reconcile local state
/// only after the returned future resolves to `Ok`.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetch every order document, with cart references dereferenced.
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError>;

    /// Patch only the `status` field of one order.
    async fn set_status(&self, id: &OrderId, status: OrderStatus)
    -> Result<(), DocumentStoreError>;

    /// Delete one order document.
    async fn delete(&self, id: &OrderId) -> Result<(), DocumentStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = DocumentStoreError::Api {
            status: 403,
            description: "Insufficient permissions".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "store returned 403: Insufficient permissions"
        );
    }
}
