//! Fixed-price listing batches on the exchange

use super::{BatchOperation, validate_ids};
use crate::builder::{ContractCall, parse_amount};
use crate::contracts::{IExchange, MarketContracts};
use crate::decoder::EventKind;
use crate::validation::{check_batch_len, parse_address};
use alloy_primitives::{Address, U256};
use market_core::MarketError;

pub const LISTING_BATCH_CEILING: usize = 50;

/// Lists tokens of one collection, each at its own price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListings {
    pub collection: String,
    pub token_ids: Vec<U256>,
    /// One decimal price per token, positionally matched
    pub prices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub collection: Address,
    pub token_ids: Vec<U256>,
    pub prices: Vec<U256>,
}

impl BatchOperation for CreateListings {
    type Validated = ListingParams;

    const NAME: &'static str = "create_listings";
    const CEILING: usize = LISTING_BATCH_CEILING;
    const CREATES: Option<EventKind> = Some(EventKind::ListingCreated);

    fn batch_len(&self) -> usize {
        self.token_ids.len()
    }

    fn validate(&self) -> Result<ListingParams, MarketError> {
        let collection = parse_address("collection", &self.collection)?;
        check_batch_len("token_ids", self.token_ids.len(), Self::CEILING)?;

        if self.prices.len() != self.token_ids.len() {
            return Err(MarketError::invalid_amount(
                "prices",
                format!(
                    "expected {} prices (one per token), got {}",
                    self.token_ids.len(),
                    self.prices.len()
                ),
            ));
        }

        let prices = self
            .prices
            .iter()
            .map(|p| parse_amount("prices", p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListingParams {
            collection,
            token_ids: self.token_ids.clone(),
            prices,
        })
    }

    fn build(params: &ListingParams, contracts: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = IExchange::createListingBatchCall {
            collection: params.collection,
            tokenIds: params.token_ids.clone(),
            prices: params.prices.clone(),
        };
        Ok(ContractCall::new(contracts.exchange, &call, Self::NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelListings {
    pub listing_ids: Vec<U256>,
}

impl BatchOperation for CancelListings {
    type Validated = Vec<U256>;

    const NAME: &'static str = "cancel_listings";
    const CEILING: usize = LISTING_BATCH_CEILING;
    const CREATES: Option<EventKind> = None;

    fn batch_len(&self) -> usize {
        self.listing_ids.len()
    }

    fn validate(&self) -> Result<Vec<U256>, MarketError> {
        validate_ids("listing_ids", &self.listing_ids, Self::CEILING)
    }

    fn build(ids: &Vec<U256>, contracts: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = IExchange::cancelListingBatchCall {
            listingIds: ids.clone(),
        };
        Ok(ContractCall::new(contracts.exchange, &call, Self::NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::ErrorCode;

    fn listing(prices: &[&str]) -> CreateListings {
        CreateListings {
            collection: "0x00000000000000000000000000000000000000c0".to_string(),
            token_ids: (0..prices.len() as u64).map(U256::from).collect(),
            prices: prices.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_price_count_must_match() {
        let mut op = listing(&["1", "2"]);
        op.prices.pop();

        let err = op.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidAmount);
        assert!(err.to_string().contains("expected 2 prices"));
    }

    #[test]
    fn test_any_bad_price_fails_whole_batch() {
        let op = listing(&["1", "0.5", "free"]);
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_listing_ceiling_is_fifty() {
        let prices = vec!["1"; 50];
        assert!(listing(&prices).validate().is_ok());

        let prices = vec!["1"; 51];
        let err = listing(&prices).validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum batch size of 50"));
    }

    #[test]
    fn test_cancel_listings_empty() {
        let err = CancelListings { listing_ids: vec![] }.validate().unwrap_err();
        assert_eq!(err.to_string(), "listing_ids cannot be empty");
    }
}
