//! # Market Core - Shared Utilities for Marketplace Clients
//!
//! This crate holds the chain-agnostic pieces used by every marketplace
//! client: the error taxonomy, configuration, logging and caller-level retry.
//!
//! ## Modules
//!
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - Typed error handling with thiserror
//! - `utils` - Logger construction and retry helpers (re-exported below)

pub mod config;
pub mod error;
pub(crate) mod utils;

pub use config::{ContractsConfig, LogConfig, MarketConfig};
pub use error::{ConfigError, ErrorCode, MarketError};

pub use utils::{with_retry, Logger, LoggerGuard, RetryConfig};
