//! # Register Configuration
//!
//! Store identity, currency formatting and scanner timings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SENTOSA_STORE_NAME, SENTOSA_SCAN_COOLDOWN_MS,                      │
//! │     SENTOSA_ARM_DELAY_MS, SENTOSA_DB_PATH                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sentosakasir/register.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Toko Sentosa", Rp, '.', 2000 ms cooldown, 500 ms arm delay        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! store_name = "Toko Sentosa Jaya"
//! currency_symbol = "Rp"
//! thousands_separator = "."
//! scan_cooldown_ms = 2000
//! arm_delay_ms = 500
//! database_path = "/var/lib/sentosa/sentosa.db"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use sentosa_core::Money;
use sentosa_db::DbConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_store_name() -> String {
    "Toko Sentosa".to_string()
}

fn default_currency_symbol() -> String {
    "Rp".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_scan_cooldown_ms() -> u64 {
    2000
}

fn default_arm_delay_ms() -> u64 {
    500
}

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Shown on the register header and receipts.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,

    /// How long scans are ignored after one resolves.
    #[serde(default = "default_scan_cooldown_ms")]
    pub scan_cooldown_ms: u64,

    /// Delay between the scanner screen gaining focus and accepting scans.
    #[serde(default = "default_arm_delay_ms")]
    pub arm_delay_ms: u64,

    /// Product store location; the platform data dir when unset.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            scan_cooldown_ms: default_scan_cooldown_ms(),
            arm_delay_ms: default_arm_delay_ms(),
            database_path: None,
        }
    }
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (register.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading register config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load register config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scan_cooldown_ms == 0 {
            return Err(ConfigError::Invalid(
                "scan_cooldown_ms must be greater than 0".into(),
            ));
        }

        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any `SENTOSA_*` source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("SENTOSA_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(ms) = var("SENTOSA_SCAN_COOLDOWN_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.scan_cooldown_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring invalid SENTOSA_SCAN_COOLDOWN_MS"),
            }
        }

        if let Some(ms) = var("SENTOSA_ARM_DELAY_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.arm_delay_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring invalid SENTOSA_ARM_DELAY_MS"),
            }
        }

        if let Some(path) = var("SENTOSA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "Sentosa", "SentosaKasir")
            .map(|dirs| dirs.config_dir().join("register.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn scan_cooldown(&self) -> Duration {
        Duration::from_millis(self.scan_cooldown_ms)
    }

    pub fn arm_delay(&self) -> Duration {
        Duration::from_millis(self.arm_delay_ms)
    }

    /// Renders an amount the way the register shows it, e.g. `Rp 230.000`.
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.thousands_separator)
    }

    /// Store settings for this register.
    pub fn db_config(&self) -> DbConfig {
        let path = self
            .database_path
            .clone()
            .or_else(DbConfig::default_path)
            .unwrap_or_else(|| PathBuf::from("./sentosa.db"));
        DbConfig::new(path)
    }
}
