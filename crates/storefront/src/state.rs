//! Application state shared across pages.

use std::sync::Arc;

use crate::cart::CartRepository;
use crate::config::StorefrontConfig;
use crate::storage::KeyValueStore;

/// Application state shared by every page in one browser-like context.
///
/// This struct is cheaply cloneable via `Arc` and is the injection point
/// for the storage backend: views receive a [`CartRepository`] built here
/// instead of reaching for a global key string.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Create a new application state over a storage backend.
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the storage backend.
    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner.store)
    }

    /// Build a cart repository over the configured storage key.
    #[must_use]
    pub fn cart_repository(&self) -> CartRepository {
        CartRepository::new(self.store(), self.inner.config.cart_key.as_str())
    }
}
