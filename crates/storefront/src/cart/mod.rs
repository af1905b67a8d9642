//! Shopping cart model.
//!
//! A cart is an ordered list of line items keyed by product name. Adding a
//! name that is already present merges into the existing line; a quantity
//! edited to zero or below removes its line. Mutations are in-memory only -
//! the caller persists the whole cart through [`CartRepository`].

use core::fmt;

use serde::{Deserialize, Serialize};

use fynbos_core::{Money, Quantity};

pub mod repository;

pub use repository::CartRepository;

/// One line in the cart: a product (or product-size variant) and a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Identity key; unique within a cart. Sized products compose
    /// `"Product (size)"` so each size is its own line.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image URL or path; decorative, never validated.
    pub image: String,
    /// Count, always at least one.
    pub quantity: Quantity,
}

impl CartLine {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Confirmation of an add, displayable as the storefront's alert message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedToCart {
    /// The line-item name that was added or merged into.
    pub name: String,
    /// The quantity added by this call (not the resulting line quantity).
    pub quantity: Quantity,
    /// Whether an existing line absorbed the add.
    pub merged: bool,
}

impl fmt::Display for AddedToCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} has been added to your cart!",
            self.quantity, self.name
        )
    }
}

/// An ordered collection of [`CartLine`]s with unique names.
///
/// Invariant: every stored quantity is at least one. Insertion order is
/// preserved across merges and edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from persisted lines, merging any duplicate names by
    /// summing their quantities (restores the uniqueness invariant on
    /// payloads written by older code).
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(&line.name, line.price, &line.image, line.quantity);
        }
        cart
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not total quantity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    /// Add `quantity` of a product. If a line with `name` exists its
    /// quantity is incremented; otherwise a new line is appended.
    pub fn add(
        &mut self,
        name: &str,
        price: Money,
        image: &str,
        quantity: Quantity,
    ) -> AddedToCart {
        let merged = if let Some(line) = self.lines.iter_mut().find(|line| line.name == name) {
            line.quantity = line.quantity.saturating_add(quantity);
            true
        } else {
            self.lines.push(CartLine {
                name: name.to_owned(),
                price,
                image: image.to_owned(),
                quantity,
            });
            false
        };

        AddedToCart {
            name: name.to_owned(),
            quantity,
            merged,
        }
    }

    /// Set the quantity of the line named `name`. A value of zero or below
    /// removes the line from its current position. Returns `false` if no
    /// such line exists.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.name == name) else {
            return false;
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return true;
        }

        let count = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = Quantity::new(count).unwrap_or(Quantity::ONE);
        }
        true
    }

    /// Increment the quantity of the line at `index` by one. Out-of-range
    /// indices are a no-op; returns whether anything changed.
    pub fn increment_at(&mut self, index: usize) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(Quantity::ONE);
                true
            }
            None => false,
        }
    }

    /// Decrement the quantity of the line at `index` by one, removing the
    /// line when the count reaches zero. Out-of-range indices are a no-op;
    /// returns whether anything changed.
    pub fn decrement_at(&mut self, index: usize) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };

        match Quantity::new(line.quantity.get() - 1) {
            Ok(reduced) => line.quantity = reduced,
            Err(_) => {
                self.lines.remove(index);
            }
        }
        true
    }

    /// `Σ price_i * quantity_i` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
