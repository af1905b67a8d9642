//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type. Operations that persist
//! return `Result<T, StorefrontError>` so storage failures surface to the
//! hosting page. Cart *loads* never error: a malformed or missing payload
//! is an empty cart.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A size selection referenced an option the product does not offer.
    #[error("unknown size option: {0}")]
    UnknownSize(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
