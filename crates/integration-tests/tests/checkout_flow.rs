//! Checkout flows: totals under both pricing policies, quantity edits,
//! and the simulated-payment submit path.

use chrono::NaiveDate;

use fynbos_core::{Money, Quantity};
use fynbos_integration_tests::{browser_context, browser_context_with};
use fynbos_storefront::checkout::{
    CheckoutPage, FieldId, PricingPolicy, SubmitOutcome,
};
use fynbos_storefront::config::StorefrontConfig;
use fynbos_storefront::state::AppState;
use fynbos_storefront::storage::KeyValueStore;
use fynbos_storefront::views::CartPage;

fn money(s: &str) -> Money {
    Money::parse(s).expect("test amount")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

fn seed_cart(state: &AppState, lines: &[(&str, &str, u32)]) {
    let repo = state.cart_repository();
    for (name, price, quantity) in lines {
        repo.add_item(
            name,
            money(price),
            "/img/placeholder.jpg",
            Quantity::new(*quantity).expect("test quantity"),
        )
        .expect("seed add succeeds");
    }
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

// ============================================================================
// Pricing Policies
// ============================================================================

#[test]
fn flat_rate_shipping_threshold() {
    for (price, expected_shipping, expected_total) in [
        ("499.99", "R65.00", "R564.99"),
        ("500.00", "R0.00", "R500.00"),
    ] {
        let (state, _store) = browser_context();
        seed_cart(&state, &[("Gift Crate", price, 1)]);

        let totals = CheckoutPage::open_with_today(&state, today()).totals_model();
        assert_eq!(totals.shipping, expected_shipping, "subtotal {price}");
        assert_eq!(totals.total, expected_total, "subtotal {price}");
        assert_eq!(totals.tax, "R0.00");
    }
}

#[test]
fn flat_rate_shipping_is_free_for_empty_cart() {
    let (state, _store) = browser_context();
    let totals = CheckoutPage::open_with_today(&state, today()).totals_model();
    assert_eq!(totals.subtotal, "R0.00");
    assert_eq!(totals.shipping, "R0.00");
    assert_eq!(totals.total, "R0.00");
}

#[test]
fn sales_tax_policy_taxes_and_never_ships() {
    let config = StorefrontConfig {
        pricing: PricingPolicy::sales_tax(),
        ..StorefrontConfig::default()
    };
    let (state, _store) = browser_context_with(config);
    seed_cart(&state, &[("Gift Crate", "100.00", 1)]);

    let totals = CheckoutPage::open_with_today(&state, today()).totals_model();
    assert_eq!(totals.tax, "R8.00");
    assert_eq!(totals.shipping, "R0.00");
    assert_eq!(totals.total, "R108.00");
    assert_eq!(totals.pay_label, "Pay R108.00");
}

// ============================================================================
// Order Summary Edits
// ============================================================================

#[test]
fn summary_edit_updates_totals_and_persists() {
    let (state, _store) = browser_context();
    seed_cart(&state, &[("Amber Lager (330ml)", "19.00", 2)]);

    let mut page = CheckoutPage::open_with_today(&state, today());
    page.set_line_quantity("Amber Lager (330ml)", 5)
        .expect("persist succeeds");

    assert_eq!(page.totals_model().subtotal, "R95.00");

    // The cart page sees the persisted edit on its next load.
    assert_eq!(CartPage::open(&state).render().rows[0].quantity, 5);
}

#[test]
fn summary_edit_to_zero_removes_row() {
    let (state, _store) = browser_context();
    seed_cart(
        &state,
        &[("Amber Lager (330ml)", "19.00", 2), ("Oak Stout (12 pack)", "160.00", 1)],
    );

    let mut page = CheckoutPage::open_with_today(&state, today());
    page.set_line_quantity("Amber Lager (330ml)", -1)
        .expect("persist succeeds");

    let rows = page.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Oak Stout (12 pack)");
    assert_eq!(page.totals_model().subtotal, "R160.00");
}

// ============================================================================
// Submit Flow
// ============================================================================

#[tokio::test(start_paused = true)]
async fn valid_submit_clears_cart_after_delay() {
    let (state, store) = browser_context();
    seed_cart(&state, &[("Amber Lager (330ml)", "19.00", 2)]);

    let mut page = CheckoutPage::open_with_today(&state, today());
    fill_form(&mut page);

    let outcome = page.submit().await.expect("submit runs");
    let SubmitOutcome::Completed { amount_paid, .. } = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(amount_paid, money("103.00"));

    // The persisted cart is gone; every page now starts empty.
    assert_eq!(store.get("cart").expect("store readable"), None);
    assert!(CartPage::open(&state).render().rows.is_empty());
    assert!(
        CheckoutPage::open_with_today(&state, today())
            .rows()
            .is_empty()
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_submit_leaves_cart_untouched() {
    let (state, store) = browser_context();
    seed_cart(&state, &[("Amber Lager (330ml)", "19.00", 2)]);
    let before = store.get("cart").expect("store readable");

    let mut page = CheckoutPage::open_with_today(&state, today());
    fill_form(&mut page);
    page.form_mut().set_value(FieldId::Email, "a@b");

    let outcome = page.submit().await.expect("submit runs");
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            invalid: vec![FieldId::Email]
        }
    );
    assert_eq!(store.get("cart").expect("store readable"), before);
}

#[tokio::test(start_paused = true)]
async fn empty_form_submit_lists_every_required_field() {
    let (state, _store) = browser_context();
    seed_cart(&state, &[("Amber Lager (330ml)", "19.00", 1)]);

    let mut page = CheckoutPage::open_with_today(&state, today());
    let outcome = page.submit().await.expect("submit runs");

    let SubmitOutcome::Rejected { invalid } = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert!(invalid.contains(&FieldId::Email));
    assert!(invalid.contains(&FieldId::CardNumber));
    assert!(!invalid.contains(&FieldId::AddressLine2));
}
