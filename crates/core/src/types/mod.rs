//! Core types for Fynbos.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod card;
pub mod email;
pub mod expiry;
pub mod id;
pub mod money;
pub mod quantity;

pub use card::{CardNumber, CardNumberError, Cvc, CvcError};
pub use email::{Email, EmailError};
pub use expiry::{ExpiryDate, ExpiryDateError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use quantity::{Quantity, QuantityError};
