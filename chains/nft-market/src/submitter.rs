//! Transaction submission
//!
//! The only place in the crate that performs network I/O. A submitter takes
//! a [`ContractCall`], sends it through the configured provider and signer,
//! waits for confirmation and hands back an immutable [`BatchReceipt`].
//!
//! Submitters never retry. A failure is mapped once and returned; retry
//! policy belongs to the caller (see `market_core::with_retry`).

use crate::builder::ContractCall;
use crate::decoder::BatchReceipt;
use crate::error_map::{map_pending_error, map_rpc_error, reverted};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use alloy_primitives::Address;
use async_trait::async_trait;
use market_core::MarketError;
use std::sync::Arc;

/// Abstraction over how a contract call reaches the chain.
///
/// Implementations own signing and submission; callers only build calls.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Sends `call` and waits until it is confirmed.
    async fn submit(&self, call: ContractCall) -> Result<BatchReceipt, MarketError>;
}

/// Submits through an alloy provider with an optional wallet attached.
#[derive(Clone)]
pub struct AlloySubmitter {
    provider: Arc<dyn Provider + Send + Sync>,
    /// Address of the wallet filler's signer; `None` for read-only providers
    sender: Option<Address>,
    confirmations: u64,
}

impl AlloySubmitter {
    pub fn new(
        provider: Arc<dyn Provider + Send + Sync>,
        sender: Option<Address>,
        confirmations: u64,
    ) -> Self {
        Self {
            provider,
            sender,
            confirmations: confirmations.max(1),
        }
    }

    #[inline]
    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    #[inline]
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        &*self.provider
    }
}

impl std::fmt::Debug for AlloySubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloySubmitter")
            .field("sender", &self.sender)
            .field("confirmations", &self.confirmations)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TransactionSubmitter for AlloySubmitter {
    async fn submit(&self, call: ContractCall) -> Result<BatchReceipt, MarketError> {
        let from = self.sender.ok_or_else(|| MarketError::NoSigner {
            operation: call.note.to_string(),
        })?;

        let tx = TransactionRequest::default()
            .to(call.to)
            .from(from)
            .value(call.value)
            .input(TransactionInput::new(call.calldata));

        tracing::debug!(
            operation = call.note,
            to = %call.to,
            "Submitting batch transaction"
        );

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(map_rpc_error)?;

        let tx_hash = *pending.tx_hash();
        tracing::debug!(operation = call.note, tx = %tx_hash, "Transaction accepted, awaiting receipt");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| map_pending_error(e, tx_hash))?;

        let receipt = BatchReceipt::from(&receipt);
        if !receipt.is_success() {
            tracing::warn!(operation = call.note, tx = %tx_hash, "Batch transaction reverted");
            return Err(reverted(tx_hash, call.note));
        }

        tracing::debug!(
            operation = call.note,
            tx = %tx_hash,
            logs = receipt.logs.len(),
            "Batch transaction confirmed"
        );

        Ok(receipt)
    }
}
