//! Marketplace contract bindings
//!
//! ABI definitions for the contracts the batch operations talk to. Every
//! creation event carries the new entity's identifier as its last indexed
//! field, which is what [`crate::decoder`] reads back out of receipts.

use crate::validation::parse_address;
use alloy::sol;
use alloy_primitives::Address;
use market_core::{ContractsConfig, MarketError};

sol! {
    interface IEnglishAuction {
        function createAuctionBatch(
            address collection,
            uint256[] tokenIds,
            uint256 startingBid,
            uint256 duration
        ) external returns (uint256[] auctionIds);
        function cancelAuctionBatch(uint256[] auctionIds) external;

        event AuctionCreated(
            address indexed seller,
            address indexed collection,
            uint256 indexed auctionId,
            uint256 tokenId,
            uint256 startingBid,
            uint256 endTime
        );
        event AuctionCancelled(uint256 indexed auctionId);
    }

    interface IDutchAuction {
        function createDutchAuctionBatch(
            address collection,
            uint256[] tokenIds,
            uint256 startPrice,
            uint256 endPrice,
            uint256 duration
        ) external returns (uint256[] auctionIds);
        function cancelDutchAuctionBatch(uint256[] auctionIds) external;

        event DutchAuctionCreated(
            address indexed seller,
            address indexed collection,
            uint256 indexed auctionId,
            uint256 tokenId,
            uint256 startPrice,
            uint256 endPrice,
            uint256 endTime
        );
        event DutchAuctionCancelled(uint256 indexed auctionId);
    }

    interface IExchange {
        function createListingBatch(
            address collection,
            uint256[] tokenIds,
            uint256[] prices
        ) external returns (uint256[] listingIds);
        function cancelListingBatch(uint256[] listingIds) external;

        event ListingCreated(
            address indexed seller,
            address indexed collection,
            uint256 indexed listingId,
            uint256 tokenId,
            uint256 price
        );
        event ListingCancelled(uint256 indexed listingId);
    }

    interface ICollectionAllowlist {
        function addToAllowlist(address[] accounts) external;
        function removeFromAllowlist(address[] accounts) external;

        event AllowlistUpdated(address indexed account, bool allowed);
    }
}

/// Deployed marketplace contracts for one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketContracts {
    pub exchange: Address,
    pub english_auction: Address,
    pub dutch_auction: Address,
}

impl MarketContracts {
    pub fn from_config(config: &ContractsConfig) -> Result<Self, MarketError> {
        Ok(Self {
            exchange: parse_address("contracts.exchange", &config.exchange)?,
            english_auction: parse_address("contracts.english_auction", &config.english_auction)?,
            dutch_auction: parse_address("contracts.dutch_auction", &config.dutch_auction)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolEvent;

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            IEnglishAuction::AuctionCreated::SIGNATURE,
            "AuctionCreated(address,address,uint256,uint256,uint256,uint256)"
        );
        assert_eq!(
            IExchange::ListingCreated::SIGNATURE,
            "ListingCreated(address,address,uint256,uint256,uint256)"
        );
    }

    #[test]
    fn test_contracts_from_config() {
        let config = ContractsConfig {
            exchange: "0x1111111111111111111111111111111111111111".into(),
            english_auction: "0x2222222222222222222222222222222222222222".into(),
            dutch_auction: "not-an-address".into(),
        };

        let err = MarketContracts::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            MarketError::InvalidAddress {
                field: "contracts.dutch_auction",
                value: "not-an-address".into(),
            }
        );
    }
}
