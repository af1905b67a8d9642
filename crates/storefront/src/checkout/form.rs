//! Payment form validation.
//!
//! Each field is an independent two-state machine: valid, or invalid with
//! a message the page shows inline. Blur runs the field's rule; editing a
//! field clears its shown error; submit runs every rule. Card, expiry, and
//! CVC values are reformatted as the shopper types.

use chrono::NaiveDate;

use fynbos_core::{CardNumber, Cvc, Email, ExpiryDate};

/// The checkout form's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Email,
    CardNumber,
    ExpirationDate,
    Cvc,
    FullName,
    Address,
    AddressLine2,
    City,
    PostalCode,
}

impl FieldId {
    /// Every field, in form order.
    pub const ALL: [Self; 9] = [
        Self::Email,
        Self::CardNumber,
        Self::ExpirationDate,
        Self::Cvc,
        Self::FullName,
        Self::Address,
        Self::AddressLine2,
        Self::City,
        Self::PostalCode,
    ];
}

/// Validation state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// No error is shown. This is also the initial state of an untouched
    /// field - rules only run on blur or submit.
    #[default]
    Valid,
    /// The field failed its rule; the message is shown inline.
    Invalid(&'static str),
}

impl FieldState {
    /// Whether no error is shown.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

#[derive(Debug, Clone, Default)]
struct Field {
    value: String,
    state: FieldState,
}

/// The checkout payment form.
///
/// `today` is supplied at construction so expiry validation is
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    email: Field,
    card_number: Field,
    expiration_date: Field,
    cvc: Field,
    full_name: Field,
    address: Field,
    address_line2: Field,
    city: Field,
    postal_code: Field,
    today: NaiveDate,
}

impl PaymentForm {
    /// Create an empty form validated against `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            email: Field::default(),
            card_number: Field::default(),
            expiration_date: Field::default(),
            cvc: Field::default(),
            full_name: Field::default(),
            address: Field::default(),
            address_line2: Field::default(),
            city: Field::default(),
            postal_code: Field::default(),
            today,
        }
    }

    fn field(&self, id: FieldId) -> &Field {
        match id {
            FieldId::Email => &self.email,
            FieldId::CardNumber => &self.card_number,
            FieldId::ExpirationDate => &self.expiration_date,
            FieldId::Cvc => &self.cvc,
            FieldId::FullName => &self.full_name,
            FieldId::Address => &self.address,
            FieldId::AddressLine2 => &self.address_line2,
            FieldId::City => &self.city,
            FieldId::PostalCode => &self.postal_code,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut Field {
        match id {
            FieldId::Email => &mut self.email,
            FieldId::CardNumber => &mut self.card_number,
            FieldId::ExpirationDate => &mut self.expiration_date,
            FieldId::Cvc => &mut self.cvc,
            FieldId::FullName => &mut self.full_name,
            FieldId::Address => &mut self.address,
            FieldId::AddressLine2 => &mut self.address_line2,
            FieldId::City => &mut self.city,
            FieldId::PostalCode => &mut self.postal_code,
        }
    }

    /// Handle an input event: store the (reformatted) value and clear any
    /// shown error. Rules re-run on the next blur or submit.
    pub fn set_value(&mut self, id: FieldId, input: &str) {
        let value = match id {
            FieldId::CardNumber => format_card_number(input),
            FieldId::ExpirationDate => format_expiry(input),
            FieldId::Cvc => format_cvc(input),
            _ => input.to_owned(),
        };

        let field = self.field_mut(id);
        field.value = value;
        field.state = FieldState::Valid;
    }

    /// The current (formatted) value of a field.
    #[must_use]
    pub fn value(&self, id: FieldId) -> &str {
        &self.field(id).value
    }

    /// The current state of a field.
    #[must_use]
    pub fn state(&self, id: FieldId) -> FieldState {
        self.field(id).state
    }

    /// The inline message for a field, if one is shown.
    #[must_use]
    pub fn error_message(&self, id: FieldId) -> Option<&'static str> {
        match self.field(id).state {
            FieldState::Valid => None,
            FieldState::Invalid(message) => Some(message),
        }
    }

    /// Handle a blur event: run the field's rule and record the outcome.
    /// Returns whether the field is valid.
    pub fn blur(&mut self, id: FieldId) -> bool {
        let outcome = validate(id, &self.field(id).value, self.today);
        let field = self.field_mut(id);
        match outcome {
            Ok(()) => {
                field.state = FieldState::Valid;
                true
            }
            Err(message) => {
                field.state = FieldState::Invalid(message);
                false
            }
        }
    }

    /// Run every field's rule (the submit path). Each failing field gets
    /// its inline message; the invalid fields are returned in form order.
    pub fn validate_all(&mut self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|&id| !self.blur(id))
            .collect()
    }
}

/// Run one field's rule against a value.
fn validate(id: FieldId, value: &str, today: NaiveDate) -> Result<(), &'static str> {
    match id {
        FieldId::Email => Email::parse(value)
            .map(drop)
            .map_err(|_| "Please enter a valid email address."),
        FieldId::CardNumber => CardNumber::parse(value)
            .map(drop)
            .map_err(|_| "Card number must be 16 digits."),
        FieldId::ExpirationDate => {
            let expiry =
                ExpiryDate::parse(value).map_err(|_| "Please enter a valid expiration date.")?;
            if expiry.is_expired(today) {
                Err("This card has expired.")
            } else {
                Ok(())
            }
        }
        FieldId::Cvc => Cvc::parse(value)
            .map(drop)
            .map_err(|_| "CVC must be 3 or 4 digits."),
        FieldId::AddressLine2 => Ok(()),
        FieldId::FullName | FieldId::Address | FieldId::City | FieldId::PostalCode => {
            if value.trim().is_empty() {
                Err("This field is required.")
            } else {
                Ok(())
            }
        }
    }
}

// =============================================================================
// Input Formatting
// =============================================================================

/// Reformat a card-number input: digits only, capped at 16, grouped in
/// blocks of four.
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CardNumber::LENGTH)
        .collect();

    digits
        .as_bytes()
        .chunks(4)
        .map(|group| std::str::from_utf8(group).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reformat an expiry input: digits only, capped at four, with a slash
/// inserted after the month.
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();

    if digits.len() > 2 {
        let (month, year) = digits.split_at(2);
        format!("{month}/{year}")
    } else {
        digits
    }
}

/// Reformat a CVC input: digits only, capped at four.
#[must_use]
pub fn format_cvc(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(4).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn filled_form() -> PaymentForm {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::Email, "shopper@example.com");
        form.set_value(FieldId::CardNumber, "1111 1111 1111 1111");
        form.set_value(FieldId::ExpirationDate, "12/26");
        form.set_value(FieldId::Cvc, "123");
        form.set_value(FieldId::FullName, "A Shopper");
        form.set_value(FieldId::Address, "1 Long Street");
        form.set_value(FieldId::City, "Cape Town");
        form.set_value(FieldId::PostalCode, "8001");
        form
    }

    #[test]
    fn test_untouched_fields_show_no_error() {
        let form = PaymentForm::new(today());
        for id in FieldId::ALL {
            assert!(form.state(id).is_valid());
        }
    }

    #[test]
    fn test_blur_marks_invalid_with_message() {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::Email, "a@b");

        assert!(!form.blur(FieldId::Email));
        assert_eq!(
            form.error_message(FieldId::Email),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn test_blur_passes_valid_value() {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::Email, "a@b.co");
        assert!(form.blur(FieldId::Email));
        assert_eq!(form.error_message(FieldId::Email), None);
    }

    #[test]
    fn test_editing_clears_shown_error() {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::Cvc, "1");
        form.blur(FieldId::Cvc);
        assert!(!form.state(FieldId::Cvc).is_valid());

        form.set_value(FieldId::Cvc, "12");
        assert!(form.state(FieldId::Cvc).is_valid());
    }

    #[test]
    fn test_expired_card_has_own_message() {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::ExpirationDate, "01/24");
        form.blur(FieldId::ExpirationDate);
        assert_eq!(
            form.error_message(FieldId::ExpirationDate),
            Some("This card has expired.")
        );
    }

    #[test]
    fn test_address_line2_is_optional() {
        let mut form = PaymentForm::new(today());
        assert!(form.blur(FieldId::AddressLine2));
    }

    #[test]
    fn test_required_fields_reject_whitespace() {
        let mut form = PaymentForm::new(today());
        form.set_value(FieldId::City, "   ");
        assert!(!form.blur(FieldId::City));
        assert_eq!(
            form.error_message(FieldId::City),
            Some("This field is required.")
        );
    }

    #[test]
    fn test_validate_all_on_empty_form() {
        let mut form = PaymentForm::new(today());
        let invalid = form.validate_all();

        // Everything except the optional address line fails.
        assert_eq!(invalid.len(), FieldId::ALL.len() - 1);
        assert!(!invalid.contains(&FieldId::AddressLine2));
    }

    #[test]
    fn test_validate_all_on_filled_form() {
        let mut form = filled_form();
        assert!(form.validate_all().is_empty());
    }

    #[test]
    fn test_validate_all_reports_each_failure_independently() {
        let mut form = filled_form();
        form.set_value(FieldId::CardNumber, "1234");
        form.set_value(FieldId::Cvc, "1");

        let invalid = form.validate_all();
        assert_eq!(invalid, vec![FieldId::CardNumber, FieldId::Cvc]);

        // Fixing one field does not touch the other's error.
        form.set_value(FieldId::Cvc, "123");
        assert!(!form.state(FieldId::CardNumber).is_valid());
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(
            format_card_number("1111111111111111"),
            "1111 1111 1111 1111"
        );
        assert_eq!(format_card_number("12345"), "1234 5");
        assert_eq!(format_card_number("4242-4242-4242-4242x9"), "4242 4242 4242 4242");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1226"), "12/26");
        assert_eq!(format_expiry("123"), "12/3");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("12/26"), "12/26");
        assert_eq!(format_expiry("122634"), "12/26");
    }

    #[test]
    fn test_format_cvc() {
        assert_eq!(format_cvc("12a34"), "1234");
        assert_eq!(format_cvc("123456"), "1234");
    }
}
