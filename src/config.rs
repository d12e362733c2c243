//! Configuration management
//!
//! Loads configuration from hotspot.toml with support for:
//! - Explorer API endpoint and request timeout
//! - Price API endpoint, asset id and timeout
//! - Report formatting (token symbol, decimals)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

pub const DEFAULT_CONFIG_PATH: &str = "hotspot.toml";

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub explorer: ExplorerConfig,
    pub price: PriceConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub base_url: String,
    #[serde(default = "default_explorer_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceConfig {
    pub base_url: String,
    /// CoinGecko id of the reward token
    pub asset_id: String,
    #[serde(default = "default_price_timeout")]
    pub timeout_secs: u64,
}

/// Report formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub token_symbol: String,
    /// Decimals shown for token amounts
    pub amount_decimals: u32,
    /// Decimals shown for the fiat total
    pub fiat_decimals: u32,
}

fn default_explorer_timeout() -> u64 {
    crate::explorer::DEFAULT_TIMEOUT.as_secs()
}

fn default_price_timeout() -> u64 {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            token_symbol: "HNT".to_string(),
            amount_decimals: 3,
            fiat_decimals: 2,
        }
    }
}

impl ExplorerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PriceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from hotspot.toml or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            // Use embedded default config
            toml::from_str(DEFAULT_CONFIG).context("Failed to parse default config")?
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.explorer.timeout_secs == 0 || self.price.timeout_secs == 0 {
            anyhow::bail!("Request timeouts must be at least one second");
        }
        if self.explorer.base_url.is_empty() || self.price.base_url.is_empty() {
            anyhow::bail!("API base URLs cannot be empty");
        }
        Ok(())
    }

    /// Apply endpoint overrides coming from the command line or environment
    pub fn with_overrides(mut self, explorer_url: Option<String>, price_url: Option<String>) -> Self {
        if let Some(url) = explorer_url.filter(|u| !u.is_empty()) {
            self.explorer.base_url = url;
        }
        if let Some(url) = price_url.filter(|u| !u.is_empty()) {
            self.price.base_url = url;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        // The embedded default config always parses; the fallback only
        // mirrors its values.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            explorer: ExplorerConfig {
                base_url: crate::explorer::DEFAULT_EXPLORER_URL.to_string(),
                timeout_secs: default_explorer_timeout(),
            },
            price: PriceConfig {
                base_url: crate::price::DEFAULT_PRICE_URL.to_string(),
                asset_id: crate::price::DEFAULT_ASSET_ID.to_string(),
                timeout_secs: default_price_timeout(),
            },
            report: ReportConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.explorer.base_url, "https://api.helium.io");
        assert_eq!(config.explorer.timeout(), Duration::from_secs(30));
        assert_eq!(config.price.asset_id, "helium");
        assert_eq!(config.report.token_symbol, "HNT");
        assert_eq!(config.report.amount_decimals, 3);
    }

    #[test]
    fn test_missing_file_uses_embedded_default() {
        let config = Config::load_from("/nonexistent/hotspot.toml").unwrap();
        assert_eq!(config.price.base_url, "https://api.coingecko.com");
    }

    #[test]
    fn test_load_custom_file() {
        let path = std::env::temp_dir().join(format!("hotspot-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[explorer]
base_url = "http://localhost:4000"

[price]
base_url = "http://localhost:4001"
asset_id = "helium"
timeout_secs = 3
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.explorer.base_url, "http://localhost:4000");
        assert_eq!(config.explorer.timeout_secs, 30);
        assert_eq!(config.price.timeout(), Duration::from_secs(3));
        assert_eq!(config.report.fiat_decimals, 2);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let path = std::env::temp_dir().join(format!("hotspot-zero-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[explorer]
base_url = "http://localhost:4000"
timeout_secs = 0

[price]
base_url = "http://localhost:4001"
asset_id = "helium"
"#,
        )
        .unwrap();

        let result = Config::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("http://explorer.local/".to_string()),
            Some(String::new()),
        );
        assert_eq!(config.explorer.base_url, "http://explorer.local/");
        assert_eq!(config.price.base_url, "https://api.coingecko.com");
    }
}
