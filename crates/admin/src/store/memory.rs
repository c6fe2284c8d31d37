//! In-memory document store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use order_desk_core::{Order, OrderId, OrderStatus};

use super::{DocumentStore, DocumentStoreError};

/// A remote call recorded by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch,
    SetStatus(OrderId, OrderStatus),
    Delete(OrderId),
}

/// Document store backed by a `Vec`, with switchable failures.
///
/// Records every call it receives, including failed ones, so tests can assert
/// that a workflow did or did not reach the store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<Vec<Order>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_fetch: AtomicBool,
    fail_mutations: AtomicBool,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemoryStore {
    /// Create a store holding `orders`.
    #[must_use]
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            documents: Mutex::new(orders.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make subsequent fetches fail.
    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent patches and deletes fail.
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Hold the next fetch open until the returned gate is notified.
    ///
    /// The held fetch has already copied the documents and recorded its call,
    /// so it returns the data as it was when it started, like a slow network
    /// round trip.
    pub async fn hold_next_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fetch_gate.lock().await = Some(Arc::clone(&gate));
        gate
    }

    /// Calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }

    /// Current documents, as the store sees them.
    pub async fn documents(&self) -> Vec<Order> {
        self.documents.lock().await.clone()
    }

    /// Replace the stored documents without recording a call.
    pub async fn replace(&self, orders: impl IntoIterator<Item = Order>) {
        *self.documents.lock().await = orders.into_iter().collect();
    }

    async fn record(&self, call: StoreCall) {
        self.calls.lock().await.push(call);
    }

    fn check(flag: &AtomicBool) -> Result<(), DocumentStoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Unavailable(
                "in-memory store set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch_orders(&self) -> Result<Vec<Order>, DocumentStoreError> {
        let documents = self.documents.lock().await.clone();
        let gate = self.fetch_gate.lock().await.take();
        self.record(StoreCall::Fetch).await;
        Self::check(&self.fail_fetch)?;
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(documents)
    }

    async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DocumentStoreError> {
        self.record(StoreCall::SetStatus(id.clone(), status)).await;
        Self::check(&self.fail_mutations)?;
        if let Some(order) = self.documents.lock().await.iter_mut().find(|o| &o.id == id) {
            order.status = Some(status);
        }
        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), DocumentStoreError> {
        self.record(StoreCall::Delete(id.clone())).await;
        Self::check(&self.fail_mutations)?;
        self.documents.lock().await.retain(|o| &o.id != id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use order_desk_core::{Contact, CustomerName, Money, ShippingAddress};

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            customer: CustomerName::default(),
            contact: Contact::default(),
            shipping: ShippingAddress::default(),
            total: Money::ZERO,
            ordered_at: None,
            status: Some(OrderStatus::Pending),
            cart_items: vec![],
        }
    }

    #[tokio::test]
    async fn test_mutations_apply_and_are_recorded() {
        let store = InMemoryStore::new([order("a"), order("b")]);
        store
            .set_status(&OrderId::new("a"), OrderStatus::Dispatch)
            .await
            .unwrap();
        store.delete(&OrderId::new("b")).await.unwrap();

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, Some(OrderStatus::Dispatch));
        assert_eq!(
            store.calls().await,
            [
                StoreCall::SetStatus(OrderId::new("a"), OrderStatus::Dispatch),
                StoreCall::Delete(OrderId::new("b")),
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_leave_documents_untouched() {
        let store = InMemoryStore::new([order("a")]);
        store.fail_mutations(true);
        assert!(store.delete(&OrderId::new("a")).await.is_err());
        assert_eq!(store.documents().await.len(), 1);

        store.fail_fetch(true);
        assert!(store.fetch_orders().await.is_err());
        assert_eq!(store.calls().await.len(), 2);
    }
}
