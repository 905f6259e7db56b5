//! Batch parameter validators
//!
//! Pure checks applied before anything is encoded or sent. Operations call
//! them in a fixed order (target address, emptiness, ceiling, then numeric
//! rules) and the first failure wins. Nothing here touches the network.

use alloy_primitives::{Address, U256};
use market_core::MarketError;
use std::str::FromStr;

/// Longest auction window any auction house accepts: 30 days.
pub const MAX_AUCTION_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Parses a `0x`-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase input is accepted as is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, MarketError> {
    let invalid = || MarketError::InvalidAddress {
        field,
        value: value.to_string(),
    };

    let hex_part = value.strip_prefix("0x").ok_or_else(invalid)?;
    if hex_part.len() != 40 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(value, None).map_err(|_| invalid())
    } else {
        Address::from_str(value).map_err(|_| invalid())
    }
}

/// Rejects an empty batch and one longer than `ceiling`. The ceiling itself
/// is allowed.
pub fn check_batch_len(field: &'static str, len: usize, ceiling: usize) -> Result<(), MarketError> {
    if len == 0 {
        return Err(MarketError::EmptyBatch { field });
    }
    if len > ceiling {
        return Err(MarketError::BatchTooLarge {
            field,
            len,
            max: ceiling,
        });
    }
    Ok(())
}

pub fn check_duration(duration_secs: u64, max_secs: u64) -> Result<(), MarketError> {
    if duration_secs == 0 {
        return Err(MarketError::InvalidDuration {
            reason: "duration must be greater than 0".to_string(),
        });
    }
    if duration_secs > max_secs {
        return Err(MarketError::InvalidDuration {
            reason: format!(
                "duration of {}s exceeds maximum of {}s",
                duration_secs, max_secs
            ),
        });
    }
    Ok(())
}

/// A descending-price auction must actually descend.
pub fn check_descending(start: U256, end: U256) -> Result<(), MarketError> {
    if start <= end {
        return Err(MarketError::invalid_amount(
            "start_price",
            "start price must be greater than end price",
        ));
    }
    Ok(())
}

/// Every entry of an address batch must be well formed.
pub fn parse_addresses(field: &'static str, values: &[String]) -> Result<Vec<Address>, MarketError> {
    values.iter().map(|v| parse_address(field, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_parse_address_accepts_lower_and_checksummed() {
        let a = parse_address("collection", LOWER).unwrap();
        let b = parse_address("collection", CHECKSUMMED).unwrap();
        assert_eq!(a, b);
        assert!(parse_address("collection", &LOWER.to_uppercase().replacen("0X", "0x", 1)).is_ok());
    }

    #[test]
    fn test_parse_address_rejects_bad_checksum() {
        let bad = "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        let err = parse_address("collection", bad).unwrap_err();
        assert_eq!(err.code(), market_core::ErrorCode::InvalidAddress);
    }

    #[test]
    fn test_parse_address_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaedff",
            "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(parse_address("collection", bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_batch_len_boundaries() {
        assert_eq!(
            check_batch_len("token_ids", 0, 20),
            Err(MarketError::EmptyBatch { field: "token_ids" })
        );
        assert!(check_batch_len("token_ids", 1, 20).is_ok());
        assert!(check_batch_len("token_ids", 20, 20).is_ok());

        let err = check_batch_len("token_ids", 21, 20).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum batch size of 20"));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(check_duration(0, MAX_AUCTION_DURATION_SECS).is_err());
        assert!(check_duration(1, MAX_AUCTION_DURATION_SECS).is_ok());
        assert!(check_duration(MAX_AUCTION_DURATION_SECS, MAX_AUCTION_DURATION_SECS).is_ok());

        let err = check_duration(MAX_AUCTION_DURATION_SECS + 1, MAX_AUCTION_DURATION_SECS)
            .unwrap_err();
        assert!(err.to_string().contains("2592000"));
    }

    #[test]
    fn test_descending_requires_strict_order() {
        assert!(check_descending(U256::from(10), U256::from(1)).is_ok());
        assert!(check_descending(U256::from(5), U256::from(5)).is_err());
        assert!(check_descending(U256::from(1), U256::from(10)).is_err());
    }
}
