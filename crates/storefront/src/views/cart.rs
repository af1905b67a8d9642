//! Cart page: line-item table with quantity controls.

use crate::cart::{Cart, CartRepository};
use crate::error::Result;
use crate::state::AppState;

/// One cart-table row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowModel {
    /// Image URL or path.
    pub image: String,
    /// Line-item name.
    pub name: String,
    /// Formatted unit price, e.g. `R19.00`.
    pub unit_price: String,
    /// Current quantity, shown between the +/- controls.
    pub quantity: u32,
    /// Formatted `price * quantity`.
    pub line_total: String,
}

/// The rendered cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPageModel {
    /// One row per line, in insertion order. The row's position is the
    /// index the +/- controls report back.
    pub rows: Vec<CartRowModel>,
    /// Formatted subtotal.
    pub subtotal: String,
    /// Formatted total. Equal to the subtotal on this page - shipping and
    /// tax are checkout-only.
    pub total: String,
}

/// The cart page.
///
/// Holds the in-memory snapshot loaded at page entry. The +/- controls
/// mutate it by row index; every mutation persists the full snapshot, and
/// the page re-renders from the same snapshot.
pub struct CartPage {
    cart: Cart,
    repository: CartRepository,
    currency_prefix: String,
}

impl CartPage {
    /// Open the cart page, loading the persisted snapshot.
    #[must_use]
    pub fn open(state: &AppState) -> Self {
        let repository = state.cart_repository();
        let cart = repository.load();
        Self {
            cart,
            repository,
            currency_prefix: state.config().currency_prefix.clone(),
        }
    }

    /// The in-memory cart snapshot.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Render the page model from the current snapshot. Pure and
    /// idempotent - rendering never mutates or persists.
    #[must_use]
    pub fn render(&self) -> CartPageModel {
        let rows = self
            .cart
            .lines()
            .iter()
            .map(|line| CartRowModel {
                image: line.image.clone(),
                name: line.name.clone(),
                unit_price: line.price.display_with(&self.currency_prefix),
                quantity: line.quantity.get(),
                line_total: line.line_total().display_with(&self.currency_prefix),
            })
            .collect();

        let subtotal = self.cart.subtotal();
        CartPageModel {
            rows,
            subtotal: subtotal.display_with(&self.currency_prefix),
            total: subtotal.display_with(&self.currency_prefix),
        }
    }

    /// Handle the + control on the row at `index`. Persists the full
    /// snapshot; out-of-range indices are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the cart fails.
    pub fn increment(&mut self, index: usize) -> Result<()> {
        if self.cart.increment_at(index) {
            self.repository.save(&self.cart)?;
        }
        Ok(())
    }

    /// Handle the - control on the row at `index`. Decrementing a
    /// quantity of one removes the row. Persists the full snapshot;
    /// out-of-range indices are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the cart fails.
    pub fn decrement(&mut self, index: usize) -> Result<()> {
        if self.cart.decrement_at(index) {
            self.repository.save(&self.cart)?;
        }
        Ok(())
    }
}
