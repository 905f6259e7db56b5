//! English and Dutch auction batches
//!
//! Both auction houses take at most [`AUCTION_BATCH_CEILING`] items per call
//! and accept durations up to [`MAX_AUCTION_DURATION_SECS`].

use super::{BatchOperation, validate_ids};
use crate::builder::{ContractCall, parse_amount};
use crate::contracts::{IDutchAuction, IEnglishAuction, MarketContracts};
use crate::decoder::EventKind;
use crate::validation::{
    MAX_AUCTION_DURATION_SECS, check_batch_len, check_descending, check_duration, parse_address,
};
use alloy_primitives::{Address, U256};
use market_core::MarketError;

pub const AUCTION_BATCH_CEILING: usize = 20;

/// Lists several tokens of one collection as English auctions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEnglishAuctions {
    pub collection: String,
    pub token_ids: Vec<U256>,
    /// Decimal amount in the payment currency, e.g. `"0.25"`
    pub starting_bid: String,
    pub duration_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnglishAuctionParams {
    pub collection: Address,
    pub token_ids: Vec<U256>,
    pub starting_bid: U256,
    pub duration_secs: u64,
}

impl BatchOperation for CreateEnglishAuctions {
    type Validated = EnglishAuctionParams;

    const NAME: &'static str = "create_english_auctions";
    const CEILING: usize = AUCTION_BATCH_CEILING;
    const CREATES: Option<EventKind> = Some(EventKind::AuctionCreated);

    fn batch_len(&self) -> usize {
        self.token_ids.len()
    }

    fn validate(&self) -> Result<EnglishAuctionParams, MarketError> {
        let collection = parse_address("collection", &self.collection)?;
        check_batch_len("token_ids", self.token_ids.len(), Self::CEILING)?;
        let starting_bid = parse_amount("starting_bid", &self.starting_bid)?;
        check_duration(self.duration_secs, MAX_AUCTION_DURATION_SECS)?;

        Ok(EnglishAuctionParams {
            collection,
            token_ids: self.token_ids.clone(),
            starting_bid,
            duration_secs: self.duration_secs,
        })
    }

    fn build(
        params: &EnglishAuctionParams,
        contracts: &MarketContracts,
    ) -> Result<ContractCall, MarketError> {
        let call = IEnglishAuction::createAuctionBatchCall {
            collection: params.collection,
            tokenIds: params.token_ids.clone(),
            startingBid: params.starting_bid,
            duration: U256::from(params.duration_secs),
        };
        Ok(ContractCall::new(contracts.english_auction, &call, Self::NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelEnglishAuctions {
    pub auction_ids: Vec<U256>,
}

impl BatchOperation for CancelEnglishAuctions {
    type Validated = Vec<U256>;

    const NAME: &'static str = "cancel_english_auctions";
    const CEILING: usize = AUCTION_BATCH_CEILING;
    const CREATES: Option<EventKind> = None;

    fn batch_len(&self) -> usize {
        self.auction_ids.len()
    }

    fn validate(&self) -> Result<Vec<U256>, MarketError> {
        validate_ids("auction_ids", &self.auction_ids, Self::CEILING)
    }

    fn build(ids: &Vec<U256>, contracts: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = IEnglishAuction::cancelAuctionBatchCall {
            auctionIds: ids.clone(),
        };
        Ok(ContractCall::new(contracts.english_auction, &call, Self::NAME))
    }
}

/// Lists several tokens as descending-price auctions sharing one price curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDutchAuctions {
    pub collection: String,
    pub token_ids: Vec<U256>,
    pub start_price: String,
    pub end_price: String,
    pub duration_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchAuctionParams {
    pub collection: Address,
    pub token_ids: Vec<U256>,
    pub start_price: U256,
    pub end_price: U256,
    pub duration_secs: u64,
}

impl BatchOperation for CreateDutchAuctions {
    type Validated = DutchAuctionParams;

    const NAME: &'static str = "create_dutch_auctions";
    const CEILING: usize = AUCTION_BATCH_CEILING;
    const CREATES: Option<EventKind> = Some(EventKind::DutchAuctionCreated);

    fn batch_len(&self) -> usize {
        self.token_ids.len()
    }

    fn validate(&self) -> Result<DutchAuctionParams, MarketError> {
        let collection = parse_address("collection", &self.collection)?;
        check_batch_len("token_ids", self.token_ids.len(), Self::CEILING)?;
        let start_price = parse_amount("start_price", &self.start_price)?;
        let end_price = parse_amount("end_price", &self.end_price)?;
        check_descending(start_price, end_price)?;
        check_duration(self.duration_secs, MAX_AUCTION_DURATION_SECS)?;

        Ok(DutchAuctionParams {
            collection,
            token_ids: self.token_ids.clone(),
            start_price,
            end_price,
            duration_secs: self.duration_secs,
        })
    }

    fn build(
        params: &DutchAuctionParams,
        contracts: &MarketContracts,
    ) -> Result<ContractCall, MarketError> {
        let call = IDutchAuction::createDutchAuctionBatchCall {
            collection: params.collection,
            tokenIds: params.token_ids.clone(),
            startPrice: params.start_price,
            endPrice: params.end_price,
            duration: U256::from(params.duration_secs),
        };
        Ok(ContractCall::new(contracts.dutch_auction, &call, Self::NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelDutchAuctions {
    pub auction_ids: Vec<U256>,
}

impl BatchOperation for CancelDutchAuctions {
    type Validated = Vec<U256>;

    const NAME: &'static str = "cancel_dutch_auctions";
    const CEILING: usize = AUCTION_BATCH_CEILING;
    const CREATES: Option<EventKind> = None;

    fn batch_len(&self) -> usize {
        self.auction_ids.len()
    }

    fn validate(&self) -> Result<Vec<U256>, MarketError> {
        validate_ids("auction_ids", &self.auction_ids, Self::CEILING)
    }

    fn build(ids: &Vec<U256>, contracts: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = IDutchAuction::cancelDutchAuctionBatchCall {
            auctionIds: ids.clone(),
        };
        Ok(ContractCall::new(contracts.dutch_auction, &call, Self::NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;
    use market_core::ErrorCode;

    const COLLECTION: &str = "0x00000000000000000000000000000000000000c0";

    fn contracts() -> MarketContracts {
        MarketContracts {
            exchange: Address::repeat_byte(0x01),
            english_auction: Address::repeat_byte(0x02),
            dutch_auction: Address::repeat_byte(0x03),
        }
    }

    fn english(n: u64) -> CreateEnglishAuctions {
        CreateEnglishAuctions {
            collection: COLLECTION.to_string(),
            token_ids: (1..=n).map(U256::from).collect(),
            starting_bid: "0.1".to_string(),
            duration_secs: 86_400,
        }
    }

    #[test]
    fn test_address_checked_before_batch_shape() {
        let mut op = english(0);
        op.collection = "0xnope".to_string();
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidAddress);
    }

    #[test]
    fn test_ceiling_checked_before_amounts() {
        let mut op = english(21);
        op.starting_bid = "abc".to_string();
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::BatchTooLarge);
    }

    #[test]
    fn test_zero_starting_bid_rejected() {
        let mut op = english(3);
        op.starting_bid = "0".to_string();
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_duration_window_enforced() {
        let mut op = english(3);
        op.duration_secs = 0;
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidDuration);

        op.duration_secs = MAX_AUCTION_DURATION_SECS + 1;
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidDuration);
    }

    #[test]
    fn test_english_build_targets_auction_house() {
        let op = english(3);
        let params = op.validate().unwrap();
        let call = CreateEnglishAuctions::build(&params, &contracts()).unwrap();

        assert_eq!(call.to, contracts().english_auction);
        let decoded =
            IEnglishAuction::createAuctionBatchCall::abi_decode(&call.calldata).unwrap();
        assert_eq!(decoded.tokenIds, params.token_ids);
        assert_eq!(decoded.duration, U256::from(86_400u64));
    }

    #[test]
    fn test_dutch_equal_prices_rejected() {
        let op = CreateDutchAuctions {
            collection: COLLECTION.to_string(),
            token_ids: vec![U256::from(1)],
            start_price: "2.0".to_string(),
            end_price: "2".to_string(),
            duration_secs: 3_600,
        };
        assert_eq!(op.validate().unwrap_err().code(), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_dutch_build_targets_dutch_house() {
        let op = CreateDutchAuctions {
            collection: COLLECTION.to_string(),
            token_ids: vec![U256::from(9)],
            start_price: "10".to_string(),
            end_price: "1".to_string(),
            duration_secs: 3_600,
        };
        let params = op.validate().unwrap();
        let call = CreateDutchAuctions::build(&params, &contracts()).unwrap();

        assert_eq!(call.to, contracts().dutch_auction);
        assert!(params.start_price > params.end_price);
    }

    #[test]
    fn test_cancel_ceiling() {
        let ok = CancelDutchAuctions {
            auction_ids: (0..20u64).map(U256::from).collect(),
        };
        assert!(ok.validate().is_ok());

        let too_many = CancelEnglishAuctions {
            auction_ids: (0..21u64).map(U256::from).collect(),
        };
        let err = too_many.validate().unwrap_err();
        assert!(err.to_string().contains("auction_ids exceeds maximum batch size of 20"));
    }
}
