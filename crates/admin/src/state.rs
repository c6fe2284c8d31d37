//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::services::{AuthService, OrderDesk};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    orders: Arc<OrderDesk>,
    auth: AuthService,
}

impl AppState {
    /// Build state from loaded configuration and an order desk.
    #[must_use]
    pub fn new(config: AdminConfig, orders: Arc<OrderDesk>) -> Self {
        let auth = AuthService::new(&config.auth);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders,
                auth,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The order list and its workflows.
    #[must_use]
    pub fn orders(&self) -> &Arc<OrderDesk> {
        &self.inner.orders
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
