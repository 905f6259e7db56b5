//! Maps alloy failures onto [`MarketError`].
//!
//! JSON-RPC error responses mean the node looked at the transaction and
//! refused it (most often a revert during gas estimation); they become
//! `TransactionFailed` with the decoded revert reason when one is present.
//! A send that never got an answer from the node is a `NetworkError`. Once
//! the node has handed back a hash, every later failure is a
//! `TransactionFailed` pinned to that hash.

use alloy::providers::PendingTransactionError;
use alloy::transports::{RpcError, TransportErrorKind};
use alloy_primitives::B256;
use alloy_sol_types::decode_revert_reason;
use market_core::MarketError;

pub fn map_rpc_error(err: RpcError<TransportErrorKind>) -> MarketError {
    if let Some(payload) = err.as_error_resp() {
        let reason = payload
            .as_revert_data()
            .and_then(|data| decode_revert_reason(&data))
            .map(|reason| format!("execution reverted: {}", reason))
            .unwrap_or_else(|| payload.message.to_string());

        return MarketError::TransactionFailed {
            tx_hash: None,
            reason,
        };
    }

    MarketError::network(err)
}

/// Failures while waiting for inclusion happen after the node accepted the
/// transaction, so they always carry the hash and are never retryable.
pub fn map_pending_error(err: PendingTransactionError, tx_hash: B256) -> MarketError {
    let reason = match err {
        PendingTransactionError::TransportError(inner) => match map_rpc_error(inner) {
            MarketError::TransactionFailed { reason, .. } => reason,
            other => format!("receipt unavailable after broadcast: {}", other),
        },
        other => format!("receipt unavailable after broadcast: {}", other),
    };

    MarketError::TransactionFailed {
        tx_hash: Some(format!("{:?}", tx_hash)),
        reason,
    }
}

/// A mined transaction whose receipt reports failure.
pub fn reverted(tx_hash: B256, note: &str) -> MarketError {
    MarketError::TransactionFailed {
        tx_hash: Some(format!("{:?}", tx_hash)),
        reason: format!("{} reverted on-chain (tx {:?})", note, tx_hash),
    }
}
