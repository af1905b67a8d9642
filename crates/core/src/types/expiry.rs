//! Card expiration date type.

use core::fmt;

use chrono::{Datelike, NaiveDate};

/// Errors that can occur when parsing an [`ExpiryDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpiryDateError {
    /// The input is not in `MM/YY` form.
    #[error("expiration date must be in MM/YY form")]
    InvalidFormat,
    /// The month is outside `[1, 12]`.
    #[error("expiration month must be between 01 and 12 (got {0:02})")]
    InvalidMonth(u32),
}

/// A card expiration date in `MM/YY` form.
///
/// Parsing is purely syntactic; whether the card has lapsed is a separate
/// question answered by [`ExpiryDate::is_expired`] against a supplied date,
/// so callers (and tests) control what "today" means.
///
/// The year is two-digit, compared against the current two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpiryDate {
    month: u32,
    year: u32,
}

impl ExpiryDate {
    /// Parse an `ExpiryDate` from `MM/YY`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly two digits, a slash,
    /// and two digits, with the month in `[1, 12]`.
    pub fn parse(s: &str) -> Result<Self, ExpiryDateError> {
        let (mm, yy) = s.split_once('/').ok_or(ExpiryDateError::InvalidFormat)?;
        if mm.len() != 2 || yy.len() != 2 {
            return Err(ExpiryDateError::InvalidFormat);
        }

        let month: u32 = mm.parse().map_err(|_| ExpiryDateError::InvalidFormat)?;
        let year: u32 = yy.parse().map_err(|_| ExpiryDateError::InvalidFormat)?;

        if month == 0 || month > 12 {
            return Err(ExpiryDateError::InvalidMonth(month));
        }

        Ok(Self { month, year })
    }

    /// The expiration month, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The two-digit expiration year.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Whether this date is strictly before `today`'s year/month.
    ///
    /// A card expiring this month is still valid.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        let current_year = today.year().rem_euclid(100).unsigned_abs();
        let current_month = today.month();

        self.year < current_year || (self.year == current_year && self.month < current_month)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

impl std::str::FromStr for ExpiryDate {
    type Err = ExpiryDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        let expiry = ExpiryDate::parse("12/26").unwrap();
        assert_eq!(expiry.month(), 12);
        assert_eq!(expiry.year(), 26);
    }

    #[test]
    fn test_parse_bad_shapes() {
        assert!(ExpiryDate::parse("").is_err());
        assert!(ExpiryDate::parse("1226").is_err());
        assert!(ExpiryDate::parse("1/26").is_err());
        assert!(ExpiryDate::parse("12/2026").is_err());
        assert!(ExpiryDate::parse("ab/cd").is_err());
    }

    #[test]
    fn test_parse_month_bounds() {
        assert!(matches!(
            ExpiryDate::parse("00/26"),
            Err(ExpiryDateError::InvalidMonth(0))
        ));
        assert!(matches!(
            ExpiryDate::parse("13/26"),
            Err(ExpiryDateError::InvalidMonth(13))
        ));
        assert!(ExpiryDate::parse("01/26").is_ok());
        assert!(ExpiryDate::parse("12/26").is_ok());
    }

    #[test]
    fn test_expired_past_year() {
        let expiry = ExpiryDate::parse("01/24").unwrap();
        assert!(expiry.is_expired(date(2025, 6, 15)));
    }

    #[test]
    fn test_expired_same_year_past_month() {
        let expiry = ExpiryDate::parse("03/25").unwrap();
        assert!(expiry.is_expired(date(2025, 6, 15)));
    }

    #[test]
    fn test_valid_same_month() {
        let expiry = ExpiryDate::parse("06/25").unwrap();
        assert!(!expiry.is_expired(date(2025, 6, 30)));
    }

    #[test]
    fn test_valid_future() {
        let expiry = ExpiryDate::parse("12/26").unwrap();
        assert!(!expiry.is_expired(date(2025, 6, 15)));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExpiryDate::parse("03/27").unwrap().to_string(), "03/27");
    }
}
