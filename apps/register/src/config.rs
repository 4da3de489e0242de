//! # Register Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                               │
//! │     --minimal, --report-dir ./reports                                   │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     PALACE_STORE_NAME="Cookie Palace KL"                                │
//! │     PALACE_PAYMENT_METHODS=cash,qr                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     ~/.config/palace/palace.toml (Linux)                                │
//! │     ~/Library/Application Support/com.cookiepalace.palace/palace.toml   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     "The Cookie Palace", RM, full features, report dir "."              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # palace.toml
//! [store]
//! name = "The Cookie Palace"
//! currency_symbol = "RM"
//!
//! [features]
//! track_inventory = true
//! payment_methods = ["cash", "card", "qr"]   # [] rings sales up without tender
//!
//! [report]
//! dir = "/srv/palace/reports"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use palace_core::{Money, PaymentMethod, PosFeatures};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "palace.toml";

// =============================================================================
// Store Settings
// =============================================================================

/// How the shop presents itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store name (shown in the banner and prompt)
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "The Cookie Palace".to_string()
}

fn default_currency_symbol() -> String {
    "RM".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Report Settings
// =============================================================================

/// Where sales reports are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            dir: default_report_dir(),
        }
    }
}

// =============================================================================
// Register Config
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub store: StoreSettings,

    /// Which optional register behaviours are enabled.
    #[serde(default)]
    pub features: PosFeatures,

    #[serde(default)]
    pub report: ReportSettings,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`palace.toml`); an explicit path must exist, the
    ///    platform default may be missing
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading register config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        if self.store.currency_symbol.chars().count() > 8 {
            return Err(ConfigError::Invalid(format!(
                "currency symbol '{}' is longer than 8 characters",
                self.store.currency_symbol
            )));
        }

        if self.report.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("report dir must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for method in &self.features.payment_methods {
            if !seen.insert(method) {
                return Err(ConfigError::Invalid(format!(
                    "payment method '{}' listed twice",
                    method
                )));
            }
        }

        Ok(())
    }

    /// Applies `PALACE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup; unparseable values are logged
    /// and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("PALACE_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(symbol) = lookup("PALACE_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("PALACE_REPORT_DIR") {
            debug!(report_dir = %dir, "Overriding report dir from environment");
            self.report.dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup("PALACE_TRACK_INVENTORY") {
            match parse_bool(&value) {
                Some(track) => self.features.track_inventory = track,
                None => warn!(value = %value, "Unknown PALACE_TRACK_INVENTORY value"),
            }
        }

        if let Some(value) = lookup("PALACE_PAYMENT_METHODS") {
            match parse_payment_methods(&value) {
                Some(methods) => {
                    debug!(?methods, "Overriding payment methods from environment");
                    self.features.payment_methods = methods;
                }
                None => warn!(value = %value, "Unknown payment method in PALACE_PAYMENT_METHODS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cookiepalace", "palace")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use palace_core::Money;
    /// use palace_register::config::RegisterConfig;
    ///
    /// let config = RegisterConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1500)), "RM 15.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.to_string();
        match digits.strip_prefix('-') {
            Some(magnitude) => format!("-{} {}", self.store.currency_symbol, magnitude),
            None => format!("{} {}", self.store.currency_symbol, digits),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Comma-separated method tokens; `none` or blank means no payment capture.
fn parse_payment_methods(value: &str) -> Option<Vec<PaymentMethod>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }

    let mut methods = Vec::new();
    for token in value.split(',') {
        let method: PaymentMethod = token.parse().ok()?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    Some(methods)
}
