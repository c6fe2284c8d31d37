//! Order workflows: load, reload, status change and delete.
//!
//! [`OrderDesk`] owns the server-side copy of the order list. Remote calls go
//! through the [`DocumentStore`] without holding any lock; the list is only
//! write-locked afterwards to apply a change the store has acknowledged.
//!
//! Every acknowledged change bumps a generation counter under that write
//! lock. A refresh whose fetch overlapped such a change is discarded and
//! fetched again, so a reload never resurrects a deleted order or reverts a
//! confirmed status.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use order_desk_core::{
    Confirmation, Notification, Order, OrderId, OrderList, OrderStatus, StatusFilter,
};

use crate::store::{DocumentStore, DocumentStoreError};

/// Outcome of the most recent load or reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has finished yet.
    Pending,
    /// The list reflects the store as of `loaded_at`.
    Ready {
        loaded_at: DateTime<Utc>,
        count: usize,
    },
    /// The last fetch failed; the list holds whatever was loaded before.
    Degraded { failed_at: DateTime<Utc> },
}

/// Result of a status change or delete workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store accepted the change and the local list was updated.
    Applied(Notification),
    /// The store rejected the change; the local list is untouched.
    Failed(Notification),
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
}

impl MutationOutcome {
    /// Toast to show the operator, if any.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Applied(n) | Self::Failed(n) => Some(n),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Fetches attempted by one refresh before it gives up on a fresh snapshot.
const MAX_REFRESH_ATTEMPTS: u32 = 3;

/// The order list and the workflows that mutate it.
pub struct OrderDesk {
    store: Arc<dyn DocumentStore>,
    orders: RwLock<OrderList>,
    /// Bumped with `orders` write-locked whenever a mutation is applied.
    generation: AtomicU64,
    load_state: RwLock<LoadState>,
}

impl std::fmt::Debug for OrderDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderDesk").finish_non_exhaustive()
    }
}

impl OrderDesk {
    /// Create an empty desk backed by `store`. Call [`Self::load`] to populate.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            orders: RwLock::new(OrderList::default()),
            generation: AtomicU64::new(0),
            load_state: RwLock::new(LoadState::Pending),
        }
    }

    /// Populate the list from the store.
    ///
    /// A failure is logged and recorded as [`LoadState::Degraded`]; the list
    /// stays empty and the server keeps running.
    ///
    /// # Errors
    ///
    /// Returns the store error so callers can report it; state has already
    /// been updated.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, DocumentStoreError> {
        self.refresh().await
    }

    /// Re-fetch the list on operator request or on the refresh interval.
    ///
    /// On failure the current list is kept.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Notification {
        match self.refresh().await {
            Ok(count) => Notification::orders_reloaded(count),
            Err(_) => Notification::reload_failed(),
        }
    }

    async fn refresh(&self) -> Result<usize, DocumentStoreError> {
        for attempt in 1..=MAX_REFRESH_ATTEMPTS {
            let generation = self.generation.load(Ordering::Acquire);
            let fetched = match self.store.fetch_orders().await {
                Ok(fetched) => fetched,
                Err(e) => {
                    *self.load_state.write().await = LoadState::Degraded {
                        failed_at: Utc::now(),
                    };
                    error!(error = %e, "Failed to load orders");
                    return Err(e);
                }
            };

            let mut orders = self.orders.write().await;
            if self.generation.load(Ordering::Acquire) != generation {
                debug!(attempt, "Orders changed during fetch, discarding snapshot");
                continue;
            }
            let list = OrderList::new(fetched);
            let count = list.len();
            *orders = list;
            drop(orders);

            self.mark_ready(count).await;
            info!(count, "Orders loaded");
            return Ok(count);
        }

        // Keep the local list: it already holds every acknowledged change.
        let count = self.orders.read().await.len();
        warn!(
            attempts = MAX_REFRESH_ATTEMPTS,
            "Orders kept changing during refresh, keeping current list"
        );
        self.mark_ready(count).await;
        Ok(count)
    }

    async fn mark_ready(&self, count: usize) {
        *self.load_state.write().await = LoadState::Ready {
            loaded_at: Utc::now(),
            count,
        };
    }

    /// Outcome of the most recent load.
    pub async fn load_state(&self) -> LoadState {
        *self.load_state.read().await
    }

    /// Copy of the full list.
    pub async fn snapshot(&self) -> OrderList {
        self.orders.read().await.clone()
    }

    /// Orders passing `filter`, in list order.
    pub async fn visible(&self, filter: StatusFilter) -> Vec<Order> {
        self.orders.read().await.visible(filter).cloned().collect()
    }

    /// Look up one order.
    pub async fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    /// Set an order's status in the store, then locally.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn change_status(&self, id: &OrderId, status: OrderStatus) -> MutationOutcome {
        match self.store.set_status(id, status).await {
            Ok(()) => {
                let mut orders = self.orders.write().await;
                self.generation.fetch_add(1, Ordering::AcqRel);
                let found = orders.apply_status_update(id, status);
                drop(orders);
                info!(found, "Order status updated");
                MutationOutcome::Applied(Notification::status_updated(status))
            }
            Err(e) => {
                error!(error = %e, "Failed to update order status");
                MutationOutcome::Failed(Notification::status_update_failed())
            }
        }
    }

    /// Delete an order from the store, then locally, if the operator confirmed.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, id: &OrderId, confirmation: Confirmation) -> MutationOutcome {
        if !confirmation.is_confirmed() {
            debug!("Delete cancelled");
            return MutationOutcome::Cancelled;
        }

        match self.store.delete(id).await {
            Ok(()) => {
                let mut orders = self.orders.write().await;
                self.generation.fetch_add(1, Ordering::AcqRel);
                let removed = orders.remove(id).is_some();
                drop(orders);
                info!(removed, "Order deleted");
                MutationOutcome::Applied(Notification::order_deleted())
            }
            Err(e) => {
                error!(error = %e, "Failed to delete order");
                MutationOutcome::Failed(Notification::delete_failed())
            }
        }
    }

    /// Reload every `period` until the returned task is aborted.
    ///
    /// The first reload happens one `period` after the call.
    pub fn spawn_periodic_refresh(desk: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            timer.tick().await;
            loop {
                timer.tick().await;
                let _ = desk.refresh().await;
            }
        })
    }
}
