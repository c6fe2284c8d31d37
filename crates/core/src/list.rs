//! Order list state and the status filter view.
//!
//! [`OrderList`] is the locally cached copy of the store's orders. Its
//! mutators are reconciliation steps: they must only be called once the store
//! has acknowledged the matching remote change.

use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::types::{OrderId, OrderStatus, StatusFilter};

/// Insertion-ordered collection of orders, unique by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderList {
    orders: Vec<Order>,
}

impl OrderList {
    /// Build a list from fetched records.
    ///
    /// If the store returns the same ID twice, the first record wins and the
    /// later ones are dropped.
    #[must_use]
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut list = Self::default();
        for order in orders {
            if list.get(&order.id).is_none() {
                list.orders.push(order);
            }
        }
        list
    }

    /// Number of cached orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// All orders in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Order] {
        &self.orders
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Set the status of the matching order. No-op if the ID is absent.
    ///
    /// Returns whether an order was updated.
    pub fn apply_status_update(&mut self, id: &OrderId, status: OrderStatus) -> bool {
        self.orders
            .iter_mut()
            .find(|order| &order.id == id)
            .map(|order| order.status = Some(status))
            .is_some()
    }

    /// Remove the matching order. No-op if the ID is absent.
    ///
    /// Returns the removed order.
    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        let index = self.orders.iter().position(|order| &order.id == id)?;
        Some(self.orders.remove(index))
    }

    /// Orders passing `filter`, in insertion order.
    ///
    /// `StatusFilter::All` yields every order unchanged.
    pub fn visible(&self, filter: StatusFilter) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |order| filter.matches(order.status))
    }
}

impl<'a> IntoIterator for &'a OrderList {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{CartItem, Contact, CustomerName, ShippingAddress};
    use crate::types::Money;

    fn order(id: &str, status: Option<OrderStatus>) -> Order {
        Order {
            id: OrderId::new(id),
            customer: CustomerName {
                first: "Ada".to_owned(),
                last: id.to_owned(),
            },
            contact: Contact::default(),
            shipping: ShippingAddress::default(),
            total: Money::ZERO,
            ordered_at: None,
            status,
            cart_items: vec![CartItem::Invalid],
        }
    }

    fn ids<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<&'a str> {
        orders.map(|o| o.id.as_str()).collect()
    }

    fn sample() -> OrderList {
        OrderList::new([
            order("o1", Some(OrderStatus::Pending)),
            order("o2", Some(OrderStatus::Success)),
            order("o3", Some(OrderStatus::Pending)),
            order("o4", None),
            order("o5", Some(OrderStatus::Dispatch)),
        ])
    }

    #[test]
    fn test_new_keeps_first_duplicate() {
        let mut dup = order("o1", Some(OrderStatus::Success));
        dup.customer.first = "Later".to_owned();
        let list = OrderList::new([order("o1", Some(OrderStatus::Pending)), dup]);
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.get(&OrderId::new("o1")).map(|o| o.status),
            Some(Some(OrderStatus::Pending))
        );
    }

    #[test]
    fn test_visible_all_is_unchanged() {
        let list = sample();
        let all: Vec<Order> = list.visible(StatusFilter::All).cloned().collect();
        assert_eq!(all.as_slice(), list.as_slice());
    }

    #[test]
    fn test_visible_by_status_keeps_relative_order() {
        let list = sample();
        for status in OrderStatus::ALL {
            let visible: Vec<&Order> = list.visible(StatusFilter::Only(status)).collect();
            assert!(visible.iter().all(|o| o.status == Some(status)));
            let expected = list.iter().filter(|o| o.status == Some(status)).count();
            assert_eq!(visible.len(), expected);
        }
        assert_eq!(
            ids(list.visible(StatusFilter::Only(OrderStatus::Pending))),
            ["o1", "o3"]
        );
    }

    #[test]
    fn test_unset_status_only_visible_under_all() {
        let list = sample();
        for status in OrderStatus::ALL {
            assert!(
                !ids(list.visible(StatusFilter::Only(status))).contains(&"o4"),
                "o4 has no status and must not match {status}"
            );
        }
        assert!(ids(list.visible(StatusFilter::All)).contains(&"o4"));
    }

    #[test]
    fn test_apply_status_update_touches_only_target() {
        let mut list = sample();
        let before = list.clone();
        assert!(list.apply_status_update(&OrderId::new("o1"), OrderStatus::Success));

        for (after, before) in list.iter().zip(before.iter()) {
            if after.id.as_str() == "o1" {
                assert_eq!(after.status, Some(OrderStatus::Success));
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn test_apply_status_update_missing_id_is_noop() {
        let mut list = sample();
        let before = list.clone();
        assert!(!list.apply_status_update(&OrderId::new("missing"), OrderStatus::Dispatch));
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove() {
        let mut list = sample();
        let removed = list.remove(&OrderId::new("o2"));
        assert_eq!(removed.map(|o| o.id), Some(OrderId::new("o2")));
        assert_eq!(ids(list.iter()), ["o1", "o3", "o4", "o5"]);

        let before = list.clone();
        assert!(list.remove(&OrderId::new("o2")).is_none());
        assert_eq!(list, before);
    }
}
