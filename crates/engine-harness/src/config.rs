//! Configuration for the load harness.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `HARNESS_SYMBOL`        (default: "BTCUSD")
//! - `HARNESS_BASE_PRICE`    (default: "10000", minor units)
//! - `HARNESS_PRICE_RANGE`   (default: "1000"; prices drawn from [base, base + range))
//! - `HARNESS_MAX_QUANTITY`  (default: "20"; quantities drawn from [1, max])
//! - `HARNESS_WRITERS`       (default: "1"; threads submitting orders)
//! - `HARNESS_READERS`       (default: "1"; tasks polling queries)
//! - `HARNESS_REPORT_EVERY`  (default: "100000" orders)
//! - `HARNESS_MAX_ORDERS`    (default: "0" = run until Ctrl-C)
//! - `HARNESS_SEED`          (default: "42")
//! - `HARNESS_POLL_MS`       (default: "250")

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::generator::GeneratorConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub symbol: String,
    pub base_price: i64,
    pub price_range: u32,
    pub max_quantity: u64,

    pub writers: usize,
    pub readers: usize,

    /// Log a report every this many submitted orders.
    pub report_every: u64,

    /// Stop after this many orders; 0 = unbounded.
    pub max_orders: u64,

    pub seed: u64,
    pub poll_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            symbol: "BTCUSD".to_string(),
            base_price: 10_000,
            price_range: 1_000,
            max_quantity: 20,
            writers: 1,
            readers: 1,
            report_every: 100_000,
            max_orders: 0,
            seed: 42,
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl HarnessConfig {
    /// Construct a `HarnessConfig` from environment variables, falling
    /// back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = HarnessConfig::default();

        let symbol = lookup("HARNESS_SYMBOL")
            .map(|s| s.trim().to_string())
            .unwrap_or(d.symbol);
        if symbol.is_empty() {
            return Err(invalid("HARNESS_SYMBOL", &symbol, "symbol is empty"));
        }

        let config = HarnessConfig {
            symbol,
            base_price: read_or_default(&lookup, "HARNESS_BASE_PRICE", d.base_price)?,
            price_range: positive(&lookup, "HARNESS_PRICE_RANGE", d.price_range)?,
            max_quantity: positive(&lookup, "HARNESS_MAX_QUANTITY", d.max_quantity)?,
            writers: positive(&lookup, "HARNESS_WRITERS", d.writers)?,
            readers: read_or_default(&lookup, "HARNESS_READERS", d.readers)?,
            report_every: positive(&lookup, "HARNESS_REPORT_EVERY", d.report_every)?,
            max_orders: read_or_default(&lookup, "HARNESS_MAX_ORDERS", d.max_orders)?,
            seed: read_or_default(&lookup, "HARNESS_SEED", d.seed)?,
            poll_interval: Duration::from_millis(positive(
                &lookup,
                "HARNESS_POLL_MS",
                d.poll_interval.as_millis() as u64,
            )?),
        };

        Ok(config)
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            symbol: self.symbol.clone(),
            base_price: self.base_price,
            price_range: self.price_range,
            max_quantity: self.max_quantity,
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn read_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val.trim().parse::<T>().map_err(|e| invalid(key, &val, e)),
        None => Ok(default),
    }
}

fn positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let value = read_or_default(lookup, key, default)?;
    if value <= T::default() {
        return Err(invalid(key, &value.to_string(), "must be greater than zero"));
    }
    Ok(value)
}
