//! Single-selection detail toggle.

use serde::{Deserialize, Serialize};

use crate::types::OrderId;

/// Which order, if any, is expanded for detail viewing.
///
/// At most one order is expanded at a time; selecting another implicitly
/// collapses the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailToggle {
    selected: Option<OrderId>,
}

impl DetailToggle {
    /// Collapse if `id` is already expanded, otherwise expand `id`.
    pub fn toggle(&mut self, id: OrderId) {
        if self.selected.as_ref() == Some(&id) {
            self.selected = None;
        } else {
            self.selected = Some(id);
        }
    }

    /// The expanded order.
    #[must_use]
    pub const fn selected(&self) -> Option<&OrderId> {
        self.selected.as_ref()
    }

    /// Whether `id` is the expanded order.
    #[must_use]
    pub fn is_expanded(&self, id: &OrderId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Collapse whatever is expanded.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}
