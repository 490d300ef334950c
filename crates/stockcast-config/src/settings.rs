//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub prediction: PredictionSettings,
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<WatchlistEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            prediction: PredictionSettings::default(),
            watchlist: default_watchlist(),
        }
    }
}

impl AppConfig {
    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let horizon = self.prediction.default_horizon_minutes;
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(ValidationError::InvalidHorizon(horizon));
        }

        let mut seen = HashSet::new();
        for entry in &self.watchlist {
            if !seen.insert(entry.symbol.to_uppercase()) {
                return Err(ValidationError::DuplicateSymbol(entry.symbol.clone()));
            }
            if !entry.market_cap.is_finite() || entry.market_cap < 0.0 {
                return Err(ValidationError::InvalidMarketCap {
                    symbol: entry.symbol.clone(),
                    value: entry.market_cap,
                });
            }
        }

        Ok(())
    }

    /// Case-insensitive watchlist lookup.
    pub fn find_symbol(&self, symbol: &str) -> Option<&WatchlistEntry> {
        self.watchlist
            .iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Watchlist entries for one market, in configured order.
    pub fn watchlist_for(&self, market: Market) -> impl Iterator<Item = &WatchlistEntry> {
        self.watchlist.iter().filter(move |entry| entry.market == market)
    }
}

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("prediction.default_horizon_minutes must be positive, got {0}")]
    InvalidHorizon(f64),

    #[error("watchlist symbol {0} appears more than once")]
    DuplicateSymbol(String),

    #[error("watchlist market cap for {symbol} must be non-negative, got {value}")]
    InvalidMarketCap { symbol: String, value: f64 },
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stockcast".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Also write logs to this file when set
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Forecast defaults used when the command line leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionSettings {
    pub default_horizon_minutes: f64,
    /// Fixed seed for reproducible runs; entropy when unset
    pub seed: Option<u64>,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            default_horizon_minutes: 30.0,
            seed: None,
        }
    }
}

/// Listing venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "us")]
    Us,
    #[serde(rename = "in")]
    India,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Us => write!(f, "US"),
            Market::India => write!(f, "India"),
        }
    }
}

/// A tracked ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub market: Market,
    pub currency: String,
    /// Market capitalisation in `currency`
    #[serde(default)]
    pub market_cap: f64,
}

impl WatchlistEntry {
    fn new(symbol: &str, name: &str, market: Market, currency: &str, market_cap: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            market,
            currency: currency.to_string(),
            market_cap,
        }
    }
}

fn default_watchlist() -> Vec<WatchlistEntry> {
    use Market::{India, Us};
    vec![
        WatchlistEntry::new("AAPL", "Apple Inc.", Us, "USD", 3.0e12),
        WatchlistEntry::new("MSFT", "Microsoft Corporation", Us, "USD", 3.1e12),
        WatchlistEntry::new("GOOGL", "Alphabet Inc.", Us, "USD", 2.1e12),
        WatchlistEntry::new("AMZN", "Amazon.com Inc.", Us, "USD", 1.9e12),
        WatchlistEntry::new("TSLA", "Tesla Inc.", Us, "USD", 7.5e11),
        WatchlistEntry::new("RELIANCE.NS", "Reliance Industries", India, "INR", 1.9e13),
        WatchlistEntry::new("TCS.NS", "Tata Consultancy Services", India, "INR", 1.4e13),
        WatchlistEntry::new("INFY.NS", "Infosys", India, "INR", 7.5e12),
        WatchlistEntry::new("HDFCBANK.NS", "HDFC Bank", India, "INR", 1.2e13),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.prediction.seed, None);
        assert!(config.watchlist_for(Market::Us).count() > 0);
        assert!(config.watchlist_for(Market::India).count() > 0);
    }

    #[test]
    fn test_rejects_bad_horizon() {
        let mut config = AppConfig::default();
        config.prediction.default_horizon_minutes = 0.0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidHorizon(0.0)));
    }

    #[test]
    fn test_rejects_duplicate_symbols() {
        let mut config = AppConfig::default();
        let mut dup = config.watchlist[0].clone();
        dup.symbol = dup.symbol.to_lowercase();
        config.watchlist.push(dup);

        assert!(matches!(
            config.validate(),
            Err(ValidationError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn test_rejects_negative_market_cap() {
        let mut config = AppConfig::default();
        config.watchlist[1].market_cap = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMarketCap { .. })
        ));
    }

    #[test]
    fn test_find_symbol_ignores_case() {
        let config = AppConfig::default();
        let entry = config.find_symbol("reliance.ns").unwrap();
        assert_eq!(entry.market, Market::India);
        assert_eq!(entry.currency, "INR");
        assert!(config.find_symbol("NOPE").is_none());
    }

    #[test]
    fn test_toml_roundtrip_keeps_market_codes() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("market = \"in\""));
        assert!(text.contains("format = \"pretty\""));

        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
