//! Storefront configuration.
//!
//! Every setting has a hard default; `from_env` lets a deployment override
//! them without code changes.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FYNBOS_CURRENCY_PREFIX` - Display prefix for amounts (default: R)
//! - `FYNBOS_PRICING_POLICY` - `flat-rate` or `sales-tax` (default: flat-rate)
//! - `FYNBOS_SHIPPING_THRESHOLD` - Free-shipping subtotal (default: 500.00)
//! - `FYNBOS_SHIPPING_FEE` - Flat shipping fee below the threshold (default: 65.00)
//! - `FYNBOS_TAX_RATE` - Sales-tax rate for the `sales-tax` policy (default: 0.08)
//! - `FYNBOS_PAYMENT_DELAY_MS` - Simulated payment delay (default: 1500)
//! - `FYNBOS_CART_KEY` - Storage key for the persisted cart (default: cart)

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use fynbos_core::Money;

use crate::checkout::pricing::PricingPolicy;

/// Default display prefix for monetary amounts.
pub const DEFAULT_CURRENCY_PREFIX: &str = "R";

/// Default simulated payment delay.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// Default storage key for the persisted cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Display prefix for monetary amounts (e.g. "R")
    pub currency_prefix: String,
    /// Checkout pricing policy
    pub pricing: PricingPolicy,
    /// Simulated payment processing delay
    pub payment_delay: Duration,
    /// Storage key for the persisted cart
    pub cart_key: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_owned(),
            pricing: PricingPolicy::flat_rate(),
            payment_delay: DEFAULT_PAYMENT_DELAY,
            cart_key: DEFAULT_CART_KEY.to_owned(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable is optional; unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let currency_prefix = get_env_or_default("FYNBOS_CURRENCY_PREFIX", DEFAULT_CURRENCY_PREFIX);

        let pricing = match get_env_or_default("FYNBOS_PRICING_POLICY", "flat-rate").as_str() {
            "flat-rate" => PricingPolicy::FlatRateShipping {
                threshold: get_money_env("FYNBOS_SHIPPING_THRESHOLD", "500.00")?,
                fee: get_money_env("FYNBOS_SHIPPING_FEE", "65.00")?,
            },
            "sales-tax" => PricingPolicy::SalesTax {
                rate: get_decimal_env("FYNBOS_TAX_RATE", "0.08")?,
            },
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "FYNBOS_PRICING_POLICY".to_owned(),
                    format!("expected 'flat-rate' or 'sales-tax', got '{other}'"),
                ));
            }
        };

        let payment_delay_ms: u64 = get_env_or_default("FYNBOS_PAYMENT_DELAY_MS", "1500")
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("FYNBOS_PAYMENT_DELAY_MS".to_owned(), e.to_string())
            })?;

        let cart_key = get_env_or_default("FYNBOS_CART_KEY", DEFAULT_CART_KEY);

        Ok(Self {
            currency_prefix,
            pricing,
            payment_delay: Duration::from_millis(payment_delay_ms),
            cart_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable as a non-negative amount.
fn get_money_env(key: &str, default: &str) -> Result<Money, ConfigError> {
    Money::parse(&get_env_or_default(key, default))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Get an environment variable as a decimal.
fn get_decimal_env(key: &str, default: &str) -> Result<Decimal, ConfigError> {
    get_env_or_default(key, default)
        .parse()
        .map_err(|e: rust_decimal::Error| {
            ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())
        })
}
