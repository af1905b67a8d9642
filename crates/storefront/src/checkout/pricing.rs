//! Checkout pricing policies.
//!
//! Two mutually exclusive policies exist: flat-rate shipping with a
//! free-shipping threshold, and a flat sales tax. A checkout applies
//! exactly one, selected by [`crate::config::StorefrontConfig`]; the
//! inapplicable component of [`Totals`] is zero.

use rust_decimal::Decimal;

use fynbos_core::Money;

/// How a checkout derives shipping and tax from the cart subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingPolicy {
    /// Flat-rate shipping: free at or above `threshold` and for an empty
    /// cart, `fee` otherwise. No tax.
    FlatRateShipping {
        /// Subtotal at or above which shipping is waived.
        threshold: Money,
        /// Flat fee charged below the threshold.
        fee: Money,
    },
    /// Sales tax at `rate` on the subtotal. No shipping.
    SalesTax {
        /// Tax rate as a fraction (0.08 = 8%).
        rate: Decimal,
    },
}

impl PricingPolicy {
    /// The flat-rate policy with the store's standard values: free
    /// shipping at R500.00, R65.00 below.
    #[must_use]
    pub fn flat_rate() -> Self {
        Self::FlatRateShipping {
            threshold: Money::new(Decimal::new(500, 0)).unwrap_or(Money::ZERO),
            fee: Money::new(Decimal::new(65, 0)).unwrap_or(Money::ZERO),
        }
    }

    /// The sales-tax policy at the store's standard 8% rate.
    #[must_use]
    pub fn sales_tax() -> Self {
        Self::SalesTax {
            rate: Decimal::new(8, 2),
        }
    }

    /// Derive checkout totals from a cart subtotal.
    #[must_use]
    pub fn totals(&self, subtotal: Money) -> Totals {
        let (shipping, tax) = match self {
            Self::FlatRateShipping { threshold, fee } => {
                let shipping = if subtotal.is_zero() || subtotal >= *threshold {
                    Money::ZERO
                } else {
                    *fee
                };
                (shipping, Money::ZERO)
            }
            Self::SalesTax { rate } => (Money::ZERO, subtotal.scale_by(*rate)),
        };

        Totals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

/// The order-summary amounts for one checkout render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// `Σ price_i * quantity_i` over the cart.
    pub subtotal: Money,
    /// Shipping cost under the active policy.
    pub shipping: Money,
    /// Tax under the active policy.
    pub tax: Money,
    /// `subtotal + shipping + tax`.
    pub total: Money,
}
