//! Product detail page: size selection and add-to-cart.

use fynbos_core::{Money, Quantity};

use crate::cart::{AddedToCart, CartRepository};
use crate::error::{Result, StorefrontError};

/// One selectable size with its own price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    /// Display label, e.g. `330ml` or `6 pack`.
    pub label: String,
    /// Unit price for this size.
    pub price: Money,
}

/// The product detail page.
///
/// One size is always selected; selecting a size switches the displayed
/// price. Adding to cart composes the line-item name `"Product (size)"`,
/// so each size of a product is its own cart line.
#[derive(Debug, Clone)]
pub struct ProductPage {
    name: String,
    image: String,
    options: Vec<SizeOption>,
    selected: usize,
}

impl ProductPage {
    /// Create a product page with its size options. The first option is
    /// selected initially. Returns `None` if no options are given - a
    /// product page always offers at least one size.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>, options: Vec<SizeOption>) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            image: image.into(),
            options,
            selected: 0,
        })
    }

    /// The product's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size options, in display order.
    #[must_use]
    pub fn options(&self) -> &[SizeOption] {
        &self.options
    }

    /// The currently selected size.
    // selected always indexes into options, which is non-empty by construction
    #[allow(clippy::indexing_slicing)]
    #[must_use]
    pub fn selected(&self) -> &SizeOption {
        &self.options[self.selected]
    }

    /// Handle a size-button click: select the option labelled `label` and
    /// switch the displayed price to it.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownSize`] if no option carries the
    /// label.
    pub fn select_size(&mut self, label: &str) -> Result<()> {
        let index = self
            .options
            .iter()
            .position(|option| option.label == label)
            .ok_or_else(|| StorefrontError::UnknownSize(label.to_owned()))?;
        self.selected = index;
        Ok(())
    }

    /// The displayed price for the selected size, e.g. `R19.00`.
    #[must_use]
    pub fn price_label(&self, currency_prefix: &str) -> String {
        self.selected().price.display_with(currency_prefix)
    }

    /// Handle the add-to-cart control: add `quantity` of the selected
    /// size, persisting through the repository. The returned confirmation
    /// displays as the page's alert message.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the cart fails.
    pub fn add_to_cart(
        &self,
        repository: &CartRepository,
        quantity: Quantity,
    ) -> Result<AddedToCart> {
        let selected = self.selected();
        let line_name = format!("{} ({})", self.name, selected.label);
        let added = repository.add_item(&line_name, selected.price, &self.image, quantity)?;
        Ok(added)
    }
}
