//! Application configuration management.
//!
//! Financial tolerances and thresholds are deliberately configuration, not
//! literals: tenants may override the defaults via their settings rows, and
//! the engines receive the resolved values as plain arguments.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Financial tolerance and threshold defaults.
    #[serde(default)]
    pub finance: FinanceConfig,
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

/// Tenant-overridable financial tolerance defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceConfig {
    /// Three-way match tolerance as a percentage of the PO amount.
    #[serde(default = "default_match_tolerance_percent")]
    pub match_tolerance_percent: Decimal,
    /// Minimum absolute three-way match tolerance in currency units.
    #[serde(default = "default_match_tolerance_floor")]
    pub match_tolerance_floor: Decimal,
    /// Allowed rounding difference between a deposit and its linked cash.
    #[serde(default = "default_deposit_rounding_tolerance")]
    pub deposit_rounding_tolerance: Decimal,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            match_tolerance_percent: default_match_tolerance_percent(),
            match_tolerance_floor: default_match_tolerance_floor(),
            deposit_rounding_tolerance: default_deposit_rounding_tolerance(),
        }
    }
}

fn default_match_tolerance_percent() -> Decimal {
    Decimal::new(5, 0)
}

fn default_match_tolerance_floor() -> Decimal {
    Decimal::new(1000, 0)
}

fn default_deposit_rounding_tolerance() -> Decimal {
    Decimal::ONE
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, in increasing precedence:
    /// 1. `config/default` (optional)
    /// 2. `config/{RUN_MODE}` (optional)
    /// 3. `DIAGNA__`-prefixed environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DIAGNA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
