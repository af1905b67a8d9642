//! Product-listing controls: search, filters, and sorting.
//!
//! The listing page owns its product cards; the controls derive which
//! cards are visible and in what order. `apply` is a single idempotent
//! render - it never mutates the underlying list, so re-running a query
//! after any control change always produces the same result.

use rust_decimal::Decimal;

use fynbos_core::Money;

pub mod product;

pub use product::{ProductPage, SizeOption};

/// One card on the product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Display name; the search target.
    pub name: String,
    /// Category the category filter matches against.
    pub category: String,
    /// Price the price-band filter and sorts use.
    pub price: Money,
}

/// Category filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only cards whose category matches exactly.
    Category(String),
}

impl CategoryFilter {
    fn matches(&self, card: &ProductCard) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => card.category == *category,
        }
    }
}

/// Price-band filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceBand {
    /// Show every price.
    #[default]
    All,
    /// Strictly below 20.
    Under20,
    /// From 20 to 30 inclusive.
    From20To30,
    /// Strictly above 30.
    Over30,
}

impl PriceBand {
    fn matches(self, price: Money) -> bool {
        let amount = price.amount();
        match self {
            Self::All => true,
            Self::Under20 => amount < Decimal::from(20),
            Self::From20To30 => amount >= Decimal::from(20) && amount <= Decimal::from(30),
            Self::Over30 => amount > Decimal::from(30),
        }
    }
}

/// Sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// The listing's own order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    /// Case-insensitive name order.
    Name,
}

/// The listing controls' combined state.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against card names; empty
    /// matches everything.
    pub search: String,
    pub category: CategoryFilter,
    pub price: PriceBand,
    pub sort: SortOrder,
}

/// The product listing.
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<ProductCard>,
}

impl CatalogView {
    /// Create a listing over its product cards.
    #[must_use]
    pub fn new(products: Vec<ProductCard>) -> Self {
        Self { products }
    }

    /// Every card, in listing order.
    #[must_use]
    pub fn products(&self) -> &[ProductCard] {
        &self.products
    }

    /// Derive the visible cards in display order. A card must pass every
    /// active control; sorting is stable, so equal keys keep listing
    /// order.
    #[must_use]
    pub fn apply(&self, query: &CatalogQuery) -> Vec<&ProductCard> {
        let term = query.search.to_lowercase();

        let mut visible: Vec<&ProductCard> = self
            .products
            .iter()
            .filter(|card| card.name.to_lowercase().contains(&term))
            .filter(|card| query.category.matches(card))
            .filter(|card| query.price.matches(card.price))
            .collect();

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLowToHigh => visible.sort_by_key(|card| card.price),
            SortOrder::PriceHighToLow => {
                visible.sort_by_key(|card| std::cmp::Reverse(card.price));
            }
            SortOrder::Name => visible.sort_by_key(|card| card.name.to_lowercase()),
        }

        visible
    }
}
