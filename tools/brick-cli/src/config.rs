//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use brick_commerce::checkout::ShippingPolicy;
use brick_commerce::Money;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Configuration file (`brick.toml` or `brick.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickConfig {
    /// Storefront presentation.
    #[serde(default)]
    pub store: StoreConfig,

    /// Checkout and order placement.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Where store state is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrickConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storefront presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Symbol printed before prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Brickshop".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Subtotal at which shipping becomes free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    /// Shipping fee below the threshold.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: i64,

    /// Latency of the simulated payment gateway.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Give up on an order after this long.
    #[serde(default = "default_order_timeout_secs")]
    pub order_timeout_secs: u64,
}

fn default_free_shipping_threshold() -> i64 {
    5000
}

fn default_shipping_fee() -> i64 {
    299
}

fn default_simulated_latency_ms() -> u64 {
    2000
}

fn default_order_timeout_secs() -> u64 {
    30
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_fee: default_shipping_fee(),
            simulated_latency_ms: default_simulated_latency_ms(),
            order_timeout_secs: default_order_timeout_secs(),
        }
    }
}

impl CheckoutConfig {
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            free_shipping_threshold: Money::new(self.free_shipping_threshold),
            shipping_fee: Money::new(self.shipping_fee),
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn order_timeout(&self) -> Duration {
        Duration::from_secs(self.order_timeout_secs)
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON document per store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".brick")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}
