//! Receipt decoding
//!
//! Recovers the identifiers of entities created by a batch call from the
//! transaction's event log.
//!
//! The chain emits logs of a single transaction in execution order, so the
//! i-th matching creation log belongs to the i-th item of the submitted
//! batch. This module relies on that ordering and does not re-derive it.

use crate::contracts::{IDutchAuction, IEnglishAuction, IExchange};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::{SolEvent, TopicList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Failure,
}

/// One emitted event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// Confirmed record of a submitted transaction. Immutable once obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    pub hash: B256,
    pub status: TxStatus,
    pub logs: Vec<LogEntry>,
}

impl BatchReceipt {
    pub fn is_success(&self) -> bool {
        self.status == TxStatus::Success
    }
}

impl From<&alloy::rpc::types::TransactionReceipt> for BatchReceipt {
    fn from(receipt: &alloy::rpc::types::TransactionReceipt) -> Self {
        let status = if receipt.inner.status() {
            TxStatus::Success
        } else {
            TxStatus::Failure
        };

        let logs = receipt
            .inner
            .logs()
            .iter()
            .map(|log| LogEntry {
                address: log.inner.address,
                topics: log.topics().to_vec(),
                data: log.data().data.clone(),
            })
            .collect();

        Self {
            hash: receipt.transaction_hash,
            status,
            logs,
        }
    }
}

/// Creation events whose last topic carries the new entity's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AuctionCreated,
    DutchAuctionCreated,
    ListingCreated,
}

impl EventKind {
    pub fn signature_hash(&self) -> B256 {
        match self {
            EventKind::AuctionCreated => IEnglishAuction::AuctionCreated::SIGNATURE_HASH,
            EventKind::DutchAuctionCreated => IDutchAuction::DutchAuctionCreated::SIGNATURE_HASH,
            EventKind::ListingCreated => IExchange::ListingCreated::SIGNATURE_HASH,
        }
    }

    /// Topic count of a well-formed log: signature plus indexed fields.
    pub fn topic_count(&self) -> usize {
        match self {
            EventKind::AuctionCreated => topics_of::<IEnglishAuction::AuctionCreated>(),
            EventKind::DutchAuctionCreated => topics_of::<IDutchAuction::DutchAuctionCreated>(),
            EventKind::ListingCreated => topics_of::<IExchange::ListingCreated>(),
        }
    }

    pub fn matches(&self, log: &LogEntry) -> bool {
        log.topics.len() == self.topic_count()
            && log.topics.first() == Some(&self.signature_hash())
    }
}

fn topics_of<E: SolEvent>() -> usize {
    <E::TopicList as TopicList>::COUNT
}

/// Returns the identifiers of every `kind` log in the receipt, in log order.
///
/// Logs of any other shape are skipped, so a receipt without creation events
/// decodes to an empty vector.
pub fn decode(receipt: &BatchReceipt, kind: EventKind) -> Vec<U256> {
    receipt
        .logs
        .iter()
        .filter(|log| kind.matches(log))
        .filter_map(|log| log.topics.last())
        .map(|topic| U256::from_be_bytes(topic.0))
        .collect()
}
