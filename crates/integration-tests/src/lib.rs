//! Integration tests for Fynbos.
//!
//! The tests in `tests/` run in-process: a [`fynbos_storefront::storage::MemoryStore`]
//! plays the role of one browser context, and each page type opens over it
//! the way a page load would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fynbos-integration-tests
//! ```
//!
//! Set `RUST_LOG` to see storefront tracing output from a test run.

use std::sync::{Arc, Once};

use fynbos_storefront::config::StorefrontConfig;
use fynbos_storefront::state::AppState;
use fynbos_storefront::storage::MemoryStore;

static INIT_TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output is captured per test.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One browser-like context: an app state over a fresh shared store.
///
/// The returned [`MemoryStore`] is a handle to the same map the state
/// uses, so tests can inspect or seed raw payloads.
#[must_use]
pub fn browser_context() -> (AppState, MemoryStore) {
    browser_context_with(StorefrontConfig::default())
}

/// A browser-like context with a specific configuration.
#[must_use]
pub fn browser_context_with(config: StorefrontConfig) -> (AppState, MemoryStore) {
    init_tracing();
    let store = MemoryStore::new();
    let state = AppState::new(config, Arc::new(store.clone()));
    (state, store)
}
