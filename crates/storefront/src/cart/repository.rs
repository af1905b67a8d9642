//! Persistence for the cart.
//!
//! The repository owns the storage key and the payload shape. Loads never
//! fail: an absent, malformed, or unreadable payload is an empty cart, and
//! the shopper starts fresh.

use std::sync::Arc;

use serde::Deserialize;

use fynbos_core::{Money, ProductId, Quantity};

use crate::cart::{AddedToCart, Cart, CartLine};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the retired id-keyed cart shape.
const LEGACY_CART_KEY: &str = "shoppingCart";

/// One line of the retired cart shape: keyed by a numeric product id, with
/// the same remaining fields. Read-only; never written back.
#[derive(Debug, Deserialize)]
struct LegacyCartLine {
    #[allow(dead_code)]
    id: ProductId,
    name: String,
    price: Money,
    image: String,
    quantity: Quantity,
}

/// Load/save/clear access to the persisted cart.
///
/// Each page loads its own in-memory [`Cart`] snapshot once through
/// `load`, mutates it locally, and writes the whole snapshot back through
/// `save` after every mutation.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartRepository {
    /// Create a repository over a storage backend and key.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the persisted cart.
    ///
    /// An absent value, a storage failure, or a payload that fails to parse
    /// all yield an empty cart - parse failures are logged and never
    /// surfaced. When the canonical key is absent, a payload under the
    /// retired `shoppingCart` key is migrated: converted to the name-keyed
    /// shape (duplicate names merged), persisted under the canonical key,
    /// and the legacy key removed.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "cart read failed; starting empty");
                return Cart::new();
            }
        };

        match raw {
            Some(raw) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Cart::from_lines(lines),
                Err(error) => {
                    tracing::warn!(key = %self.key, %error, "malformed cart payload; starting empty");
                    Cart::new()
                }
            },
            None => self.migrate_legacy().unwrap_or_default(),
        }
    }

    /// Serialize and overwrite the entire persisted cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let payload = serde_json::to_string(cart.lines())
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        tracing::debug!(key = %self.key, lines = cart.len(), "persisting cart");
        self.store.set(&self.key, &payload)
    }

    /// Remove the persisted cart entirely (used after checkout completes).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }

    /// Load, add one item (merging by name), and persist.
    ///
    /// This is the product-page entry point: it reads a fresh snapshot so
    /// adds from a product page never clobber edits a previously loaded
    /// page has already persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend write fails.
    pub fn add_item(
        &self,
        name: &str,
        price: Money,
        image: &str,
        quantity: Quantity,
    ) -> Result<AddedToCart, StorageError> {
        let mut cart = self.load();
        let added = cart.add(name, price, image, quantity);
        self.save(&cart)?;
        Ok(added)
    }

    /// Convert a legacy `shoppingCart` payload if one exists.
    fn migrate_legacy(&self) -> Option<Cart> {
        let raw = self.store.get(LEGACY_CART_KEY).ok().flatten()?;

        let legacy: Vec<LegacyCartLine> = match serde_json::from_str(&raw) {
            Ok(legacy) => legacy,
            Err(error) => {
                tracing::warn!(%error, "malformed legacy cart payload; starting empty");
                return None;
            }
        };

        let lines = legacy
            .into_iter()
            .map(|line| CartLine {
                name: line.name,
                price: line.price,
                image: line.image,
                quantity: line.quantity,
            })
            .collect();
        let cart = Cart::from_lines(lines);

        if let Err(error) = self.save(&cart) {
            tracing::warn!(%error, "legacy cart migration write failed");
        } else if let Err(error) = self.store.remove(LEGACY_CART_KEY) {
            tracing::warn!(%error, "legacy cart key removal failed");
        } else {
            tracing::info!(lines = cart.len(), "migrated legacy cart payload");
        }

        Some(cart)
    }
}
