//! Order lifecycle status and the status filter.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known status or filter value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0}")]
pub struct StatusParseError(pub String);

/// Order lifecycle status.
///
/// The set is closed: the store value `"pending"`, `"dispatch"` or `"success"`
/// maps to a variant and anything else is treated as unset by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet handed to a carrier.
    Pending,
    /// Order handed over for delivery.
    Dispatch,
    /// Order delivered.
    Success,
}

impl OrderStatus {
    /// Every status, in the order the UI lists them.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Dispatch, Self::Success];

    /// Value stored in the document store and submitted by forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatch => "dispatch",
            Self::Success => "success",
        }
    }

    /// Label shown in the status picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Dispatch => "Dispatch",
            Self::Success => "Completed",
        }
    }

    /// Stored value with its first letter upper-cased (`"dispatch"` -> `"Dispatch"`).
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Dispatch => "Dispatch",
            Self::Success => "Success",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "dispatch" => Ok(Self::Dispatch),
            "success" => Ok(Self::Success),
            _ => Err(StatusParseError(s.to_owned())),
        }
    }
}

/// Status filter applied to the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Show every order, including those with an unset status.
    #[default]
    All,
    /// Show only orders whose status equals this one.
    Only(OrderStatus),
}

impl StatusFilter {
    /// Filter tabs in display order.
    pub const TABS: [Self; 4] = [
        Self::All,
        Self::Only(OrderStatus::Pending),
        Self::Only(OrderStatus::Dispatch),
        Self::Only(OrderStatus::Success),
    ];

    /// Query-string value for this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Tab label for this filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.title(),
        }
    }

    /// Whether an order with the given status passes the filter.
    #[must_use]
    pub fn matches(self, status: Option<OrderStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!("processing".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_store_values() {
        let json = serde_json::to_string(&OrderStatus::Dispatch).unwrap();
        assert_eq!(json, "\"dispatch\"");
        let parsed: OrderStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(parsed, OrderStatus::Success);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OrderStatus::Success.label(), "Completed");
        assert_eq!(OrderStatus::Success.title(), "Success");
        assert_eq!(OrderStatus::Dispatch.title(), "Dispatch");
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "pending".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Pending)
        );
        assert!("all".parse::<StatusFilter>().is_err());
        assert!("cancelled".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_filter_matches_exactly() {
        let dispatch = StatusFilter::Only(OrderStatus::Dispatch);
        assert!(dispatch.matches(Some(OrderStatus::Dispatch)));
        assert!(!dispatch.matches(Some(OrderStatus::Pending)));
        assert!(!dispatch.matches(None));
        assert!(StatusFilter::All.matches(None));
    }
}
