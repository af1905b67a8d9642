//! Line-item quantity type.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero; a stored quantity must be at least one.
    #[error("quantity must be at least 1")]
    Zero,
    /// The input string is not a whole number.
    #[error("not a whole number: {0}")]
    Invalid(String),
}

/// A positive line-item quantity.
///
/// A cart never stores a quantity below one - a computed quantity of zero or
/// less removes the line instead. This type makes that invariant
/// unrepresentable, including on deserialization of persisted carts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest storable quantity.
    pub const ONE: Self = Self(1);

    /// Create a `Quantity` from a count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] if the count is zero.
    pub const fn new(count: u32) -> Result<Self, QuantityError> {
        if count == 0 {
            return Err(QuantityError::Zero);
        }
        Ok(Self(count))
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u32 = s
            .trim()
            .parse()
            .map_err(|_| QuantityError::Invalid(s.to_owned()))?;
        Self::new(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(Quantity::new(0), Err(QuantityError::Zero)));
    }

    #[test]
    fn test_new_accepts_one() {
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_saturating_add() {
        let a = Quantity::new(2).unwrap();
        let b = Quantity::new(3).unwrap();
        assert_eq!(a.saturating_add(b).get(), 5);

        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.saturating_add(Quantity::ONE).get(), u32::MAX);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("4".parse::<Quantity>().unwrap().get(), 4);
        assert_eq!(" 2 ".parse::<Quantity>().unwrap().get(), 2);
        assert!(matches!(
            "0".parse::<Quantity>(),
            Err(QuantityError::Zero)
        ));
        assert!(matches!(
            "x".parse::<Quantity>(),
            Err(QuantityError::Invalid(_))
        ));
        assert!(matches!(
            "-1".parse::<Quantity>(),
            Err(QuantityError::Invalid(_))
        ));
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }
}
