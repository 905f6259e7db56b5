//! Operations Module - the batch operation catalogue
//!
//! Every batch operation is a request struct implementing [`BatchOperation`].
//! The trait pins down, per operation:
//!
//! - its **ceiling**, a compile-time constant checked against the batch length
//! - how its raw parameters are **validated** into typed values
//! - how those values are **built** into a [`ContractCall`]
//! - which creation event, if any, its receipt is **decoded** against
//!
//! [`crate::MarketClient::execute`] drives any operation through
//! validate → build → submit → decode.
//!
//! # Ceilings
//!
//! | operation | ceiling |
//! |---|---|
//! | English / Dutch auction create & cancel | 20 |
//! | listing create & cancel | 50 |
//! | allowlist add & remove | 100 |

use crate::builder::ContractCall;
use crate::contracts::MarketContracts;
use crate::decoder::EventKind;
use crate::validation::check_batch_len;
use alloy_primitives::U256;
use market_core::MarketError;

pub mod allowlist;
pub mod auctions;
pub mod listings;

pub use allowlist::{
    ALLOWLIST_BATCH_CEILING, AddToAllowlist, AllowlistParams, RemoveFromAllowlist,
};
pub use auctions::{
    AUCTION_BATCH_CEILING, CancelDutchAuctions, CancelEnglishAuctions, CreateDutchAuctions,
    CreateEnglishAuctions, DutchAuctionParams, EnglishAuctionParams,
};
pub use listings::{CancelListings, CreateListings, LISTING_BATCH_CEILING, ListingParams};

/// A validated, encodable batch request.
pub trait BatchOperation: Send + Sync {
    /// Validated form of the request.
    type Validated;

    /// Operation name used in logs and error messages
    const NAME: &'static str;

    /// Maximum number of items in one batch (inclusive)
    const CEILING: usize;

    /// Creation event emitted once per item, `None` when the operation
    /// creates nothing (cancellations, allowlist edits).
    const CREATES: Option<EventKind>;

    /// Number of items in the batch as supplied by the caller.
    fn batch_len(&self) -> usize;

    /// Checks the raw parameters. Pure and synchronous.
    fn validate(&self) -> Result<Self::Validated, MarketError>;

    /// Encodes validated parameters into the call sent on-chain.
    fn build(
        validated: &Self::Validated,
        contracts: &MarketContracts,
    ) -> Result<ContractCall, MarketError>;
}

/// Cancels share one shape: a non-empty, bounded list of identifiers.
pub(crate) fn validate_ids(
    field: &'static str,
    ids: &[U256],
    ceiling: usize,
) -> Result<Vec<U256>, MarketError> {
    check_batch_len(field, ids.len(), ceiling)?;
    Ok(ids.to_vec())
}
