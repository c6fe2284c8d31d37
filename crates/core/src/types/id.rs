//! Document identifiers.
//!
//! The document store assigns opaque string IDs (e.g. `"8f2c1d0e-..."` or
//! `"drafts.order-42"`). They are never parsed or generated locally, only
//! compared and echoed back to the store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an order document.
///
/// Unique within an [`OrderList`](crate::OrderList) and the only key used to
/// target status updates and deletions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap a document ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_id() {
        let id = OrderId::new("drafts.order-42");
        assert_eq!(id.to_string(), "drafts.order-42");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = OrderId::from("o1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"o1\"");
        let back: OrderId = serde_json::from_str("\"o1\"").unwrap();
        assert_eq!(back, id);
    }
}
