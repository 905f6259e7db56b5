//! NFT Market - batch operations for an EVM NFT marketplace
//!
//! A client library for the marketplace's exchange, English and Dutch auction
//! houses, and collection allowlists, built with Alloy. It covers the part of
//! the SDK where bulk requests are validated, submitted as one transaction
//! and decoded back into the identifiers they created.
//!
//! # Architecture
//!
//! - **[`validation`]**: pure checks on addresses, batch sizes and amounts
//! - **[`builder`]**: amount conversion and ABI encoding into a [`ContractCall`]
//! - **[`submitter`]**: the [`TransactionSubmitter`] seam and its Alloy implementation
//! - **[`decoder`]**: receipt log → ordered entity identifiers
//! - **[`error_map`]**: RPC and transport failures → [`MarketError`]
//! - **[`operations`]**: the batch operation catalogue and its ceilings
//! - **[`MarketClient`]**: validate → build → submit → decode
//!
//! # Quick Start
//!
//! ```bash
//! # Create three English auctions in one transaction
//! cargo run -p nft-market --bin market-cli -- \
//!     english-create --collection 0x... --token-ids 1,2,3 \
//!     --starting-bid 0.1 --duration 86400
//! ```
//!
//! # Errors
//!
//! Every operation returns [`MarketError`], whose [`MarketError::code`] is one
//! of a closed set of [`ErrorCode`]s. Validation errors are raised before any
//! network call. Nothing is retried inside this crate.

pub mod builder;
pub mod client;
pub mod contracts;
pub mod decoder;
pub mod error_map;
pub mod operations;
pub mod submitter;
pub mod validation;

pub use builder::{ContractCall, PAYMENT_DECIMALS, parse_amount};
pub use client::{BatchOutcome, MarketClient};
pub use contracts::MarketContracts;
pub use decoder::{BatchReceipt, EventKind, LogEntry, TxStatus, decode};
pub use market_core::{ErrorCode, MarketError};
pub use operations::BatchOperation;
pub use submitter::{AlloySubmitter, TransactionSubmitter};
