//! Configuration loader for marketplace clients
//!
//! Configuration is read from a TOML file and can be overridden through the
//! environment (a `.env` file is honoured):
//!
//! - `MARKET_RPC_URL`
//! - `MARKET_CHAIN_ID`
//! - `MARKET_CONFIRMATIONS`

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// RPC endpoint URL
    pub rpc_url: String,
    pub chain_id: u64,
    /// Blocks to wait for after inclusion before a receipt is returned
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    /// HTTP transport timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Marketplace contract addresses, kept as strings until a client validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
    pub exchange: String,
    pub english_auction: String,
    pub dutch_auction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `nft_market=debug,warn`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for hourly rolling log files; console only when unset
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_file_prefix(),
            ansi: default_ansi(),
        }
    }
}

fn default_confirmations() -> u64 {
    1
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "market".to_string()
}

fn default_ansi() -> bool {
    true
}

impl MarketConfig {
    /// Loads `.env`, reads the TOML file, applies environment overrides and
    /// validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = Self::from_path(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file without touching the environment
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: display.clone(),
            msg: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { reason, .. } => ConfigError::ParseError {
                path: display,
                reason,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("MARKET_RPC_URL") {
            self.rpc_url = url;
        }
        if let Ok(raw) = env::var("MARKET_CHAIN_ID") {
            self.chain_id = parse_env("MARKET_CHAIN_ID", &raw)?;
        }
        if let Ok(raw) = env::var("MARKET_CONFIRMATIONS") {
            self.confirmations = parse_env("MARKET_CONFIRMATIONS", &raw)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.rpc_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.rpc_url.clone(),
            });
        }

        if self.confirmations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmations".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        for (field, value) in [
            ("contracts.exchange", &self.contracts.exchange),
            ("contracts.english_auction", &self.contracts.english_auction),
            ("contracts.dutch_auction", &self.contracts.dutch_auction),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: e.to_string(),
        })
}
