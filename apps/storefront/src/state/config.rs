//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RASOI_DELIVERY_FEE=3.49                                            │
//! │     RASOI_CHAT_REPLY_DELAY_MS=500                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/orprasoi/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.orprasoi.storefront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     £2.99 delivery, £1.49 service, ORD prefix, 3s chat reply           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "OrpRasoi"
//! currency_code = "GBP"
//! currency_symbol = "£"
//! currency_decimals = 2
//!
//! [fees]
//! delivery_fee = "2.99"
//! service_fee = "1.49"
//!
//! [orders]
//! number_prefix = "ORD"
//! estimated_delivery = "25-30 minutes"
//!
//! [chat]
//! auto_reply_delay_ms = 3000
//! auto_reply_text = "Thanks for your message! The restaurant will reply shortly."
//! ```
//!
//! Read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rasoi_core::pricing::{DELIVERY_FEE, SERVICE_FEE};
use rasoi_core::{FeeSchedule, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// Store identity and currency display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u32,
}

fn default_store_name() -> String {
    "OrpRasoi".to_string()
}

fn default_currency_code() -> String {
    "GBP".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_currency_decimals() -> u32 {
    2
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

/// Fees added at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSettings {
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: Decimal,

    #[serde(default = "default_service_fee")]
    pub service_fee: Decimal,
}

fn default_delivery_fee() -> Decimal {
    DELIVERY_FEE.amount()
}

fn default_service_fee() -> Decimal {
    SERVICE_FEE.amount()
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            delivery_fee: default_delivery_fee(),
            service_fee: default_service_fee(),
        }
    }
}

/// Order numbering and confirmation copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettings {
    /// First segment of `ORD-2024-001236`.
    #[serde(default = "default_number_prefix")]
    pub number_prefix: String,

    /// Shown on the confirmation page.
    #[serde(default = "default_estimated_delivery")]
    pub estimated_delivery: String,
}

fn default_number_prefix() -> String {
    "ORD".to_string()
}

fn default_estimated_delivery() -> String {
    "25-30 minutes".to_string()
}

impl Default for OrderSettings {
    fn default() -> Self {
        OrderSettings {
            number_prefix: default_number_prefix(),
            estimated_delivery: default_estimated_delivery(),
        }
    }
}

/// The simulated restaurant reply on the tracking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_reply_delay")]
    pub auto_reply_delay_ms: u64,

    #[serde(default = "default_reply_text")]
    pub auto_reply_text: String,
}

fn default_reply_delay() -> u64 {
    3000
}

fn default_reply_text() -> String {
    "Thanks for your message! The restaurant will reply shortly.".to_string()
}

impl Default for ChatSettings {
    fn default() -> Self {
        ChatSettings {
            auto_reply_delay_ms: default_reply_delay(),
            auto_reply_text: default_reply_text(),
        }
    }
}

impl ChatSettings {
    pub fn auto_reply_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reply_delay_ms)
    }
}

// =============================================================================
// Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub fees: FeeSettings,

    #[serde(default)]
    pub orders: OrderSettings,

    #[serde(default)]
    pub chat: ChatSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
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
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        if self.store.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.store.currency_decimals
            )));
        }

        if self.fees.delivery_fee.is_sign_negative() || self.fees.service_fee.is_sign_negative() {
            return Err(ConfigError::Invalid("fees must not be negative".into()));
        }

        let prefix = &self.orders.number_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "number_prefix must be letters or digits, got '{}'",
                prefix
            )));
        }

        if self.chat.auto_reply_text.trim().is_empty() {
            return Err(ConfigError::Invalid("auto_reply_text must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("RASOI_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("RASOI_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(fee) = lookup("RASOI_DELIVERY_FEE") {
            match fee.parse::<Decimal>() {
                Ok(d) => {
                    debug!(delivery_fee = %d, "Overriding delivery fee from environment");
                    self.fees.delivery_fee = d;
                }
                Err(_) => warn!(value = %fee, "Ignoring unparseable RASOI_DELIVERY_FEE"),
            }
        }

        if let Some(fee) = lookup("RASOI_SERVICE_FEE") {
            match fee.parse::<Decimal>() {
                Ok(d) => {
                    debug!(service_fee = %d, "Overriding service fee from environment");
                    self.fees.service_fee = d;
                }
                Err(_) => warn!(value = %fee, "Ignoring unparseable RASOI_SERVICE_FEE"),
            }
        }

        if let Some(prefix) = lookup("RASOI_ORDER_PREFIX") {
            self.orders.number_prefix = prefix;
        }

        if let Some(delay) = lookup("RASOI_CHAT_REPLY_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(auto_reply_delay_ms = ms, "Overriding chat reply delay from environment");
                    self.chat.auto_reply_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring unparseable RASOI_CHAT_REPLY_DELAY_MS"),
            }
        }

        if let Some(text) = lookup("RASOI_CHAT_REPLY_TEXT") {
            self.chat.auto_reply_text = text;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orprasoi", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Fee schedule handed to the pricing calculator.
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            delivery_fee: Money::from_decimal(self.fees.delivery_fee),
            service_fee: Money::from_decimal(self.fees.service_fee),
        }
    }

    /// Formats an amount for display, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use rasoi_core::Money;
    /// use rasoi_storefront::state::StorefrontConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_decimal(Decimal::new(34603, 3))), "£34.60");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = self.store.currency_decimals;
        let rounded = amount
            .amount()
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

        format!(
            "{}{}{:.prec$}",
            if rounded.is_sign_negative() && !rounded.is_zero() {
                "-"
            } else {
                ""
            },
            self.store.currency_symbol,
            rounded.abs(),
            prec = decimals as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_pricing_constants() {
        let config = StorefrontConfig::default();
        assert_eq!(config.fee_schedule(), FeeSchedule::default());
        assert_eq!(config.orders.number_prefix, "ORD");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_minor(1234)), "£12.34");
        assert_eq!(config.format_currency(Money::from_decimal(dec!(3.345))), "£3.35");
        assert_eq!(config.format_currency(Money::zero()), "£0.00");
        assert_eq!(config.format_currency(Money::from_minor(-1234)), "-£12.34");
    }

    #[test]
    fn test_format_currency_zero_decimals() {
        let mut config = StorefrontConfig::default();
        config.store.currency_symbol = "¥".to_string();
        config.store.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_decimal(dec!(1234.5))), "¥1235");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [fees]
            delivery_fee = "3.49"

            [chat]
            auto_reply_delay_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.fees.delivery_fee, dec!(3.49));
        assert_eq!(config.fees.service_fee, dec!(1.49));
        assert_eq!(config.chat.auto_reply_delay(), Duration::from_millis(500));
        assert_eq!(config.store.name, "OrpRasoi");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            StorefrontConfig::from_toml_str("[fees\ndelivery_fee = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = StorefrontConfig::default();
        config.fees.service_fee = dec!(-1);
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.orders.number_prefix = "OR-D".to_string();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.chat.auto_reply_text = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RASOI_DELIVERY_FEE", "0.99"),
            ("RASOI_SERVICE_FEE", "not-a-number"),
            ("RASOI_ORDER_PREFIX", "RAS"),
            ("RASOI_CHAT_REPLY_DELAY_MS", "10"),
        ]);

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.fees.delivery_fee, dec!(0.99));
        assert_eq!(config.fees.service_fee, dec!(1.49));
        assert_eq!(config.orders.number_prefix, "RAS");
        assert_eq!(config.chat.auto_reply_delay_ms, 10);
    }

    #[test]
    fn test_bad_reply_delay_keeps_default() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| (key == "RASOI_CHAT_REPLY_DELAY_MS").then(|| "soon".to_string()));
        assert_eq!(config.chat.auto_reply_delay_ms, 3000);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rasoi-storefront-does-not-exist.toml");
        let config = StorefrontConfig::load_or_default(Some(path));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = StorefrontConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = StorefrontConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
