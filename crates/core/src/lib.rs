//! Fynbos Core - Shared types library.
//!
//! This crate provides common types used across all Fynbos components:
//! - `storefront` - Cart, checkout, and catalog behavior
//! - `integration-tests` - Cross-page scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for money, quantities, payment fields,
//!   and type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
