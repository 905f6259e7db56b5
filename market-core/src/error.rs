//! # Core Error Types
//!
//! Centralized error definitions shared by every marketplace crate.
//!
//! [`MarketError`] is the only error a batch operation ever returns. Each
//! variant maps onto exactly one [`ErrorCode`], so callers can branch on the
//! code programmatically and still show the descriptive message.

use std::fmt;
use thiserror::Error;

/// Stable, closed set of failure codes for batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidAddress,
    EmptyBatch,
    BatchTooLarge,
    InvalidAmount,
    InvalidDuration,
    NoSigner,
    TransactionFailed,
    NetworkError,
}

impl ErrorCode {
    /// Wire form of the code, stable across releases.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidAddress => "INVALID_ADDRESS",
            ErrorCode::EmptyBatch => "EMPTY_BATCH",
            ErrorCode::BatchTooLarge => "BATCH_TOO_LARGE",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::InvalidDuration => "INVALID_DURATION",
            ErrorCode::NoSigner => "NO_SIGNER",
            ErrorCode::TransactionFailed => "TRANSACTION_FAILED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
        }
    }

    /// True for codes raised before anything is sent to the network.
    pub const fn is_pre_submission(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidAddress
                | ErrorCode::EmptyBatch
                | ErrorCode::BatchTooLarge
                | ErrorCode::InvalidAmount
                | ErrorCode::InvalidDuration
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error surfaced by every batch operation.
///
/// Created at the point of first failure and propagated unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("Invalid address for '{field}': '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} cannot be empty")]
    EmptyBatch { field: &'static str },

    #[error("{field} exceeds maximum batch size of {max} (got {len})")]
    BatchTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Invalid amount for '{field}': {reason}")]
    InvalidAmount { field: &'static str, reason: String },

    #[error("Invalid duration: {reason}")]
    InvalidDuration { reason: String },

    #[error("No signer configured: '{operation}' requires an authenticated signer")]
    NoSigner { operation: String },

    #[error("Transaction failed: {reason}")]
    TransactionFailed {
        tx_hash: Option<String>,
        reason: String,
    },

    #[error("Network error: {reason}")]
    Network { reason: String },
}

impl MarketError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MarketError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            MarketError::EmptyBatch { .. } => ErrorCode::EmptyBatch,
            MarketError::BatchTooLarge { .. } => ErrorCode::BatchTooLarge,
            MarketError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            MarketError::InvalidDuration { .. } => ErrorCode::InvalidDuration,
            MarketError::NoSigner { .. } => ErrorCode::NoSigner,
            MarketError::TransactionFailed { .. } => ErrorCode::TransactionFailed,
            MarketError::Network { .. } => ErrorCode::NetworkError,
        }
    }

    /// Only transport failures are worth retrying; everything else fails the
    /// same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        self.code() == ErrorCode::NetworkError
    }

    /// Hash of the transaction that failed, when one was mined or known.
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            MarketError::TransactionFailed { tx_hash, .. } => tx_hash.as_deref(),
            _ => None,
        }
    }

    pub fn invalid_amount(field: &'static str, reason: impl Into<String>) -> Self {
        MarketError::InvalidAmount {
            field,
            reason: reason.into(),
        }
    }

    pub fn network(reason: impl fmt::Display) -> Self {
        MarketError::Network {
            reason: reason.to_string(),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Parse error in {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },
}
