//! Payment card field types.

use core::fmt;

/// Errors that can occur when parsing a [`CardNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardNumberError {
    /// The input contains a character that is neither a digit nor whitespace.
    #[error("card number may contain only digits")]
    NonDigit,
    /// The digit count is not exactly sixteen.
    #[error("card number must be 16 digits (got {0})")]
    WrongLength(usize),
}

/// A 16-digit payment card number.
///
/// Whitespace is stripped on parse, so the visually grouped form typed into
/// a checkout field (`1111 1111 1111 1111`) is accepted. The stored value is
/// the bare digit string.
///
/// `Display` is masked - only the last four digits appear in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    /// Number of digits in a card number.
    pub const LENGTH: usize = 16;

    /// Parse a `CardNumber`, stripping whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if any non-whitespace character is not a digit, or
    /// if the digit count is not exactly sixteen.
    pub fn parse(s: &str) -> Result<Self, CardNumberError> {
        let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if digits.chars().any(|c| !c.is_ascii_digit()) {
            return Err(CardNumberError::NonDigit);
        }
        if digits.len() != Self::LENGTH {
            return Err(CardNumberError::WrongLength(digits.len()));
        }

        Ok(Self(digits))
    }

    /// The bare 16-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last four digits, for display on confirmations.
    #[must_use]
    pub fn last_four(&self) -> &str {
        self.0.get(Self::LENGTH - 4..).unwrap_or(&self.0)
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**** **** **** {}", self.last_four())
    }
}

/// Errors that can occur when parsing a [`Cvc`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CvcError {
    /// The input is not 3 or 4 digits.
    #[error("CVC must be 3 or 4 digits")]
    Invalid,
}

/// A card verification code: three or four digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cvc(String);

impl Cvc {
    /// Parse a `Cvc`.
    ///
    /// # Errors
    ///
    /// Returns [`CvcError::Invalid`] unless the input is exactly 3 or 4
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, CvcError> {
        let valid_len = s.len() == 3 || s.len() == 4;
        if !valid_len || s.chars().any(|c| !c.is_ascii_digit()) {
            return Err(CvcError::Invalid);
        }
        Ok(Self(s.to_owned()))
    }

    /// The digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
