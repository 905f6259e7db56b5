//! Collection allowlist batches
//!
//! These calls go to the collection contract itself rather than to a
//! marketplace contract, so the target comes from the request.

use super::BatchOperation;
use crate::builder::ContractCall;
use crate::contracts::{ICollectionAllowlist, MarketContracts};
use crate::decoder::EventKind;
use crate::validation::{check_batch_len, parse_address, parse_addresses};
use alloy_primitives::Address;
use market_core::MarketError;

pub const ALLOWLIST_BATCH_CEILING: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowlistParams {
    pub collection: Address,
    pub addresses: Vec<Address>,
}

fn validate_allowlist(
    collection: &str,
    addresses: &[String],
) -> Result<AllowlistParams, MarketError> {
    let collection = parse_address("collection", collection)?;
    check_batch_len("addresses", addresses.len(), ALLOWLIST_BATCH_CEILING)?;
    let addresses = parse_addresses("addresses", addresses)?;

    Ok(AllowlistParams {
        collection,
        addresses,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToAllowlist {
    pub collection: String,
    pub addresses: Vec<String>,
}

impl BatchOperation for AddToAllowlist {
    type Validated = AllowlistParams;

    const NAME: &'static str = "add_to_allowlist";
    const CEILING: usize = ALLOWLIST_BATCH_CEILING;
    const CREATES: Option<EventKind> = None;

    fn batch_len(&self) -> usize {
        self.addresses.len()
    }

    fn validate(&self) -> Result<AllowlistParams, MarketError> {
        validate_allowlist(&self.collection, &self.addresses)
    }

    fn build(params: &AllowlistParams, _: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = ICollectionAllowlist::addToAllowlistCall {
            accounts: params.addresses.clone(),
        };
        Ok(ContractCall::new(params.collection, &call, Self::NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFromAllowlist {
    pub collection: String,
    pub addresses: Vec<String>,
}

impl BatchOperation for RemoveFromAllowlist {
    type Validated = AllowlistParams;

    const NAME: &'static str = "remove_from_allowlist";
    const CEILING: usize = ALLOWLIST_BATCH_CEILING;
    const CREATES: Option<EventKind> = None;

    fn batch_len(&self) -> usize {
        self.addresses.len()
    }

    fn validate(&self) -> Result<AllowlistParams, MarketError> {
        validate_allowlist(&self.collection, &self.addresses)
    }

    fn build(params: &AllowlistParams, _: &MarketContracts) -> Result<ContractCall, MarketError> {
        let call = ICollectionAllowlist::removeFromAllowlistCall {
            accounts: params.addresses.clone(),
        };
        Ok(ContractCall::new(params.collection, &call, Self::NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = "0x00000000000000000000000000000000000000c0";

    fn addresses(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("0x{:040x}", i + 1)).collect()
    }

    #[test]
    fn test_allowlist_ceiling_is_one_hundred() {
        let ok = AddToAllowlist {
            collection: COLLECTION.to_string(),
            addresses: addresses(100),
        };
        assert_eq!(ok.validate().unwrap().addresses.len(), 100);

        let too_many = AddToAllowlist {
            collection: COLLECTION.to_string(),
            addresses: addresses(101),
        };
        let err = too_many.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum batch size of 100"));
    }

    #[test]
    fn test_one_bad_entry_rejects_batch() {
        let mut list = addresses(5);
        list[3] = "0x123".to_string();
        let op = RemoveFromAllowlist {
            collection: COLLECTION.to_string(),
            addresses: list,
        };

        match op.validate() {
            Err(MarketError::InvalidAddress { field, value }) => {
                assert_eq!(field, "addresses");
                assert_eq!(value, "0x123");
            }
            other => panic!("Expected InvalidAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_build_targets_collection() {
        let op = AddToAllowlist {
            collection: COLLECTION.to_string(),
            addresses: addresses(2),
        };
        let params = op.validate().unwrap();
        let contracts = MarketContracts {
            exchange: Address::repeat_byte(1),
            english_auction: Address::repeat_byte(2),
            dutch_auction: Address::repeat_byte(3),
        };

        let call = AddToAllowlist::build(&params, &contracts).unwrap();
        assert_eq!(call.to, params.collection);
    }
}
