//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Exchange rate configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Exchange rate configuration.
///
/// The static per-USD table is loaded once at process start and is immutable
/// thereafter; replacing it requires a redeploy or restart. When `per_usd` is
/// empty the built-in table is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// How long a cached rate stays fresh, in days.
    #[serde(default = "default_freshness_days")]
    pub freshness_days: i64,
    /// Optional override of the static fallback table: units of each
    /// currency per 1 USD, keyed by currency code.
    #[serde(default)]
    pub per_usd: BTreeMap<String, Decimal>,
}

fn default_freshness_days() -> i64 {
    7
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            freshness_days: default_freshness_days(),
            per_usd: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ZAKATH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rates_config_defaults() {
        let rates = RatesConfig::default();
        assert_eq!(rates.freshness_days, 7);
        assert!(rates.per_usd.is_empty());
    }

    #[test]
    fn test_rates_config_deserializes_overrides() {
        let json = r#"{"freshness_days": 3, "per_usd": {"USD": "1.0", "SAR": "3.75"}}"#;
        let rates: RatesConfig = serde_json::from_str(json).unwrap();
        assert_eq!(rates.freshness_days, 3);
        assert_eq!(rates.per_usd.get("SAR"), Some(&dec!(3.75)));
    }
}
