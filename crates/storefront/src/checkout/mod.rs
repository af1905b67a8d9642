//! Checkout page: order summary, totals, payment form, and submit flow.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use fynbos_core::Money;

use crate::cart::{Cart, CartRepository};
use crate::error::Result;
use crate::state::AppState;

pub mod form;
pub mod pricing;

pub use form::{FieldId, FieldState, PaymentForm};
pub use pricing::{PricingPolicy, Totals};

/// One order-summary row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRowModel {
    /// Line-item name; also the key quantity edits address.
    pub name: String,
    /// Image URL or path.
    pub image: String,
    /// Formatted unit price, e.g. `R19.00`.
    pub unit_price: String,
    /// Current quantity.
    pub quantity: u32,
    /// Formatted `price * quantity`.
    pub line_total: String,
}

/// Formatted order-summary amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsModel {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    /// Label for the pay control, e.g. `Pay R564.99`.
    pub pay_label: String,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed validation; nothing was charged and the
    /// persisted cart is untouched.
    Rejected {
        /// The failing fields, in form order.
        invalid: Vec<FieldId>,
    },
    /// A submit is already in flight; the control is disabled.
    Busy,
    /// The simulated payment succeeded and the persisted cart was cleared.
    Completed {
        /// Reference shown on the confirmation.
        order_reference: Uuid,
        /// The total that was "charged".
        amount_paid: Money,
    },
}

/// The checkout page.
///
/// Loads its cart snapshot once on open; quantity edits mutate the
/// snapshot, persist it in full, and recompute totals. Submit validates
/// the form, waits the simulated processing delay, and clears the
/// persisted cart.
pub struct CheckoutPage {
    cart: Cart,
    repository: CartRepository,
    policy: PricingPolicy,
    currency_prefix: String,
    payment_delay: Duration,
    form: PaymentForm,
    processing: bool,
}

impl CheckoutPage {
    /// Open the checkout page, loading the cart snapshot and validating
    /// card expiry against today's date.
    #[must_use]
    pub fn open(state: &AppState) -> Self {
        Self::open_with_today(state, Utc::now().date_naive())
    }

    /// Open with an explicit "today" for deterministic expiry validation.
    #[must_use]
    pub fn open_with_today(state: &AppState, today: NaiveDate) -> Self {
        let repository = state.cart_repository();
        let cart = repository.load();
        let config = state.config();

        Self {
            cart,
            repository,
            policy: config.pricing.clone(),
            currency_prefix: config.currency_prefix.clone(),
            payment_delay: config.payment_delay,
            form: PaymentForm::new(today),
            processing: false,
        }
    }

    /// The payment form.
    #[must_use]
    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    /// The payment form, for input and blur events.
    pub fn form_mut(&mut self) -> &mut PaymentForm {
        &mut self.form
    }

    /// The in-memory cart snapshot.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether a simulated payment is in flight (the pay control is
    /// disabled and the busy indicator shown).
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// One row per cart line, in insertion order.
    #[must_use]
    pub fn rows(&self) -> Vec<SummaryRowModel> {
        self.cart
            .lines()
            .iter()
            .map(|line| SummaryRowModel {
                name: line.name.clone(),
                image: line.image.clone(),
                unit_price: line.price.display_with(&self.currency_prefix),
                quantity: line.quantity.get(),
                line_total: line.line_total().display_with(&self.currency_prefix),
            })
            .collect()
    }

    /// Raw totals under the active pricing policy.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.policy.totals(self.cart.subtotal())
    }

    /// Formatted totals for the order summary.
    #[must_use]
    pub fn totals_model(&self) -> TotalsModel {
        let totals = self.totals();
        let total = totals.total.display_with(&self.currency_prefix);
        TotalsModel {
            subtotal: totals.subtotal.display_with(&self.currency_prefix),
            shipping: totals.shipping.display_with(&self.currency_prefix),
            tax: totals.tax.display_with(&self.currency_prefix),
            pay_label: format!("Pay {total}"),
            total,
        }
    }

    /// Handle a quantity edit on the summary row keyed by `name`. A value
    /// of zero or below removes the line (and its row); the full snapshot
    /// is persisted either way. Editing an unknown row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the cart fails.
    pub fn set_line_quantity(&mut self, name: &str, quantity: i64) -> Result<()> {
        if !self.cart.set_quantity(name, quantity) {
            return Ok(());
        }
        self.repository.save(&self.cart)?;
        Ok(())
    }

    /// Handle a submit attempt.
    ///
    /// Runs every field validator. If any field is invalid the outcome
    /// lists them and nothing else happens. Otherwise the simulated
    /// payment runs: the pay control is disabled for a fixed delay, the
    /// persisted cart is cleared, and a success confirmation with an order
    /// reference is produced. The simulated payment always succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing the persisted cart fails.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.processing {
            return Ok(SubmitOutcome::Busy);
        }

        let invalid = self.form.validate_all();
        if !invalid.is_empty() {
            return Ok(SubmitOutcome::Rejected { invalid });
        }

        self.processing = true;
        tokio::time::sleep(self.payment_delay).await;

        let amount_paid = self.totals().total;
        let clear_result = self.repository.clear();
        self.processing = false;
        clear_result?;

        self.cart = Cart::new();
        let order_reference = Uuid::new_v4();
        tracing::info!(%order_reference, amount = %amount_paid, "simulated payment completed");

        Ok(SubmitOutcome::Completed {
            order_reference,
            amount_paid,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::{KeyValueStore, MemoryStore};

    use fynbos_core::Quantity;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn state_with_cart(lines: &[(&str, &str, u32)]) -> (AppState, MemoryStore) {
        let store = MemoryStore::new();
        let state = AppState::new(StorefrontConfig::default(), Arc::new(store.clone()));

        let mut cart = Cart::new();
        for (name, price, quantity) in lines {
            cart.add(name, money(price), "", Quantity::new(*quantity).unwrap());
        }
        state.cart_repository().save(&cart).unwrap();

        (state, store)
    }

    fn fill_form(page: &mut CheckoutPage) {
        let form = page.form_mut();
        form.set_value(FieldId::Email, "shopper@example.com");
        form.set_value(FieldId::CardNumber, "1111 1111 1111 1111");
        form.set_value(FieldId::ExpirationDate, "12/99");
        form.set_value(FieldId::Cvc, "123");
        form.set_value(FieldId::FullName, "A Shopper");
        form.set_value(FieldId::Address, "1 Long Street");
        form.set_value(FieldId::City, "Cape Town");
        form.set_value(FieldId::PostalCode, "8001");
    }

    #[test]
    fn test_rows_and_totals() {
        let (state, _store) = state_with_cart(&[("Lager (330ml)", "19.00", 2), ("Pale Ale (6 pack)", "100.00", 1)]);
        let page = CheckoutPage::open_with_today(&state, today());

        let rows = page.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit_price, "R19.00");
        assert_eq!(rows[0].line_total, "R38.00");

        // Subtotal 138.00 is below the threshold, so flat-rate shipping applies.
        let totals = page.totals_model();
        assert_eq!(totals.subtotal, "R138.00");
        assert_eq!(totals.shipping, "R65.00");
        assert_eq!(totals.tax, "R0.00");
        assert_eq!(totals.total, "R203.00");
        assert_eq!(totals.pay_label, "Pay R203.00");
    }

    #[test]
    fn test_quantity_edit_recomputes_totals() {
        let (state, _store) = state_with_cart(&[("Lager (330ml)", "19.00", 2)]);
        let mut page = CheckoutPage::open_with_today(&state, today());

        page.set_line_quantity("Lager (330ml)", 30).unwrap();
        assert_eq!(page.totals().subtotal, money("570.00"));
        // Over the threshold now: shipping waived.
        assert_eq!(page.totals().shipping, Money::ZERO);
    }

    #[test]
    fn test_quantity_edit_to_zero_removes_row_and_persists() {
        let (state, _store) = state_with_cart(&[("Lager (330ml)", "19.00", 2), ("Pale Ale (6 pack)", "100.00", 1)]);
        let mut page = CheckoutPage::open_with_today(&state, today());

        page.set_line_quantity("Lager (330ml)", 0).unwrap();
        assert_eq!(page.rows().len(), 1);

        // The removal was persisted in full.
        let reloaded = state.cart_repository().load();
        assert!(reloaded.get("Lager (330ml)").is_none());
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_unknown_row_edit_is_noop() {
        let (state, _store) = state_with_cart(&[("Lager (330ml)", "19.00", 2)]);
        let mut page = CheckoutPage::open_with_today(&state, today());

        page.set_line_quantity("Cider", 5).unwrap();
        assert_eq!(page.rows().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_invalid_field_leaves_cart() {
        let (state, store) = state_with_cart(&[("Lager (330ml)", "19.00", 2)]);
        let mut page = CheckoutPage::open_with_today(&state, today());

        fill_form(&mut page);
        page.form_mut().set_value(FieldId::CardNumber, "1234");

        let outcome = page.submit().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec![FieldId::CardNumber]
            }
        );
        assert!(store.get("cart").unwrap().is_some());
        assert!(!page.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_clears_cart() {
        let (state, store) = state_with_cart(&[("Lager (330ml)", "19.00", 2)]);
        let mut page = CheckoutPage::open_with_today(&state, today());
        fill_form(&mut page);

        let outcome = page.submit().await.unwrap();
        let SubmitOutcome::Completed { amount_paid, .. } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };

        // 38.00 subtotal + 65.00 shipping.
        assert_eq!(amount_paid, money("103.00"));
        assert_eq!(store.get("cart").unwrap(), None);
        assert!(page.cart().is_empty());
        assert!(!page.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_card_rejected_at_submit() {
        let (state, _store) = state_with_cart(&[("Lager (330ml)", "19.00", 1)]);
        let mut page = CheckoutPage::open_with_today(&state, today());
        fill_form(&mut page);
        page.form_mut().set_value(FieldId::ExpirationDate, "01/24");

        let outcome = page.submit().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec![FieldId::ExpirationDate]
            }
        );
    }
}
