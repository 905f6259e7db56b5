//! Batch request builder
//!
//! Turns validated parameters into the exact call the submitter sends:
//! target contract, ABI-encoded calldata and attached value. Decimal amount
//! strings become base units here.

use alloy_primitives::utils::{ParseUnits, parse_units};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use market_core::MarketError;

/// Decimals of the marketplace payment currency.
pub const PAYMENT_DECIMALS: u8 = 18;

/// A single contract call, ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub calldata: Bytes,
    pub value: U256,
    /// Operation name, used in logs and in signer-related errors
    pub note: &'static str,
}

impl ContractCall {
    pub fn new<C: SolCall>(to: Address, call: &C, note: &'static str) -> Self {
        Self {
            to,
            calldata: Bytes::from(call.abi_encode()),
            value: U256::ZERO,
            note,
        }
    }
}

/// Converts a decimal amount such as `"1.5"` into base units.
///
/// Fails with `InvalidAmount` when the string is not a decimal number, has
/// more fractional digits than the currency supports, or is not strictly
/// positive.
pub fn parse_amount(field: &'static str, value: &str) -> Result<U256, MarketError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MarketError::invalid_amount(field, "amount is required"));
    }

    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > PAYMENT_DECIMALS as usize {
            return Err(MarketError::invalid_amount(
                field,
                format!(
                    "'{}' allows at most {} decimal places",
                    value, PAYMENT_DECIMALS
                ),
            ));
        }
    }

    let parsed = parse_units(trimmed, PAYMENT_DECIMALS).map_err(|e| {
        MarketError::invalid_amount(field, format!("'{}' is not a valid amount: {}", value, e))
    })?;

    match parsed {
        ParseUnits::U256(amount) if !amount.is_zero() => Ok(amount),
        _ => Err(MarketError::invalid_amount(
            field,
            format!("'{}' must be greater than 0", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::IEnglishAuction;

    #[test]
    fn test_parse_amount_scales_to_base_units() {
        let one = U256::from(10u64).pow(U256::from(18));
        assert_eq!(parse_amount("price", "1").unwrap(), one);
        assert_eq!(parse_amount("price", "1.0").unwrap(), one);
        assert_eq!(
            parse_amount("price", "0.5").unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        for bad in ["0", "0.0", "-1", "-0.5"] {
            let err = parse_amount("price", bad).unwrap_err();
            assert!(err.to_string().contains("must be greater than 0"), "{}", err);
        }
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for bad in [
            "",
            "   ",
            "abc",
            "1.2.3",
            "1e18x",
            "1.0000000000000000009",
            "0.0000000000000000001",
        ] {
            let err = parse_amount("starting_bid", bad).unwrap_err();
            assert_eq!(err.code(), market_core::ErrorCode::InvalidAmount, "{}", bad);
        }
    }

    #[test]
    fn test_parse_amount_rejects_excess_precision() {
        for bad in ["1.0000000000000000009", "0.0000000000000000001"] {
            let err = parse_amount("price", bad).unwrap_err();
            assert!(err.to_string().contains("at most 18 decimal places"), "{}", err);
        }

        let smallest = parse_amount("price", "0.000000000000000001").unwrap();
        assert_eq!(smallest, U256::from(1));
    }

    #[test]
    fn test_contract_call_encodes_selector() {
        let call = IEnglishAuction::cancelAuctionBatchCall {
            auctionIds: vec![U256::from(1), U256::from(2)],
        };
        let built = ContractCall::new(Address::ZERO, &call, "cancel_english_auctions");

        assert_eq!(&built.calldata[..4], IEnglishAuction::cancelAuctionBatchCall::SELECTOR);
        assert_eq!(built.value, U256::ZERO);
    }
}
