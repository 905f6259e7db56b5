//! Market Client - entry point for batch operations
//!
//! [`MarketClient`] runs every batch operation through the same pipeline:
//!
//! 1. **Validate** the raw request; the first failing rule aborts the call
//! 2. **Build** the ABI-encoded contract call
//! 3. **Submit** it through the injected [`TransactionSubmitter`]
//! 4. **Decode** created identifiers from the receipt
//!
//! Steps 1 and 2 never touch the network, so a rejected batch has no side
//! effects. The client holds no mutable state and can be shared freely
//! between concurrent callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use nft_market::MarketClient;
//! use nft_market::operations::CreateEnglishAuctions;
//! use alloy_primitives::U256;
//!
//! # async fn example(config: market_core::MarketConfig) -> anyhow::Result<()> {
//! let client = MarketClient::connect(&config, Some("0x...")).await?;
//!
//! let outcome = client
//!     .create_english_auctions(&CreateEnglishAuctions {
//!         collection: "0x00000000000000000000000000000000000000c0".into(),
//!         token_ids: vec![U256::from(1), U256::from(2), U256::from(3)],
//!         starting_bid: "0.1".into(),
//!         duration_secs: 86_400,
//!     })
//!     .await?;
//!
//! println!("Auction IDs: {:?}", outcome.ids);
//! # Ok(())
//! # }
//! ```

use crate::contracts::MarketContracts;
use crate::decoder::{BatchReceipt, decode};
use crate::operations::{
    AddToAllowlist, BatchOperation, CancelDutchAuctions, CancelEnglishAuctions, CancelListings,
    CreateDutchAuctions, CreateEnglishAuctions, CreateListings, RemoveFromAllowlist,
};
use crate::submitter::{AlloySubmitter, TransactionSubmitter};
use alloy::providers::Provider;
use alloy::rpc::client::ClientBuilder;
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::Http;
use alloy_primitives::U256;
use anyhow::{Context, Result};
use market_core::{MarketConfig, MarketError};
use alloy::transports::http::reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of a successful batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Identifiers of created entities, in submission order
    pub ids: Vec<U256>,
    /// Identifiers the batch was expected to create
    pub expected: usize,
    pub receipt: BatchReceipt,
}

impl BatchOutcome {
    /// True when the receipt yielded one identifier per created item.
    pub fn is_complete(&self) -> bool {
        self.ids.len() == self.expected
    }

    /// Turns a short or long decode into an error for callers that need the
    /// one-identifier-per-item guarantee.
    pub fn ensure_complete(self) -> Result<Self, MarketError> {
        if self.is_complete() {
            return Ok(self);
        }
        Err(MarketError::TransactionFailed {
            tx_hash: Some(format!("{:?}", self.receipt.hash)),
            reason: format!(
                "decoded {} identifiers from receipt, expected {}",
                self.ids.len(),
                self.expected
            ),
        })
    }
}

/// Batch-operation client over an injected submitter.
#[derive(Debug, Clone)]
pub struct MarketClient<S = AlloySubmitter> {
    contracts: MarketContracts,
    submitter: S,
}

impl<S: TransactionSubmitter> MarketClient<S> {
    pub fn new(contracts: MarketContracts, submitter: S) -> Self {
        Self {
            contracts,
            submitter,
        }
    }

    #[inline]
    pub fn contracts(&self) -> &MarketContracts {
        &self.contracts
    }

    #[inline]
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Runs one batch operation end to end.
    pub async fn execute<O: BatchOperation>(&self, op: &O) -> Result<BatchOutcome, MarketError> {
        let validated = op.validate()?;
        let call = O::build(&validated, &self.contracts)?;
        let receipt = self.submitter.submit(call).await?;

        let (ids, expected) = match O::CREATES {
            Some(kind) => (decode(&receipt, kind), op.batch_len()),
            None => (Vec::new(), 0),
        };

        Ok(BatchOutcome {
            ids,
            expected,
            receipt,
        })
    }

    pub async fn create_english_auctions(
        &self,
        op: &CreateEnglishAuctions,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn cancel_english_auctions(
        &self,
        op: &CancelEnglishAuctions,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn create_dutch_auctions(
        &self,
        op: &CreateDutchAuctions,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn cancel_dutch_auctions(
        &self,
        op: &CancelDutchAuctions,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn create_listings(&self, op: &CreateListings) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn cancel_listings(&self, op: &CancelListings) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn add_to_allowlist(
        &self,
        op: &AddToAllowlist,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }

    pub async fn remove_from_allowlist(
        &self,
        op: &RemoveFromAllowlist,
    ) -> Result<BatchOutcome, MarketError> {
        self.execute(op).await
    }
}

impl MarketClient<AlloySubmitter> {
    /// Connects to the configured RPC endpoint.
    ///
    /// Without a private key the client can still validate and build batches,
    /// but every submission fails with `NoSigner`.
    pub async fn connect(config: &MarketConfig, private_key: Option<&str>) -> Result<Self> {
        let contracts = MarketContracts::from_config(&config.contracts)
            .context("Invalid marketplace contract address in config")?;

        let reqwest_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build reqwest client")?;

        let http_transport = Http::with_client(
            reqwest_client,
            config.rpc_url.parse::<Url>().context("Invalid RPC URL")?,
        );
        let rpc_client = ClientBuilder::default().transport(http_transport, false);

        let (provider, sender) = match private_key {
            Some(key) => {
                let signer: PrivateKeySigner =
                    key.parse().context("Failed to parse private key")?;
                let signer = signer.with_chain_id(Some(config.chain_id));
                let sender = signer.address();
                let provider: Arc<dyn Provider + Send + Sync> = Arc::new(
                    alloy::providers::ProviderBuilder::new()
                        .wallet(signer)
                        .connect_client(rpc_client),
                );
                (provider, Some(sender))
            }
            None => {
                let provider: Arc<dyn Provider + Send + Sync> =
                    Arc::new(alloy::providers::ProviderBuilder::new().connect_client(rpc_client));
                (provider, None)
            }
        };

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(crate::error_map::map_rpc_error)
            .context("Provider connection failed")?;

        if chain_id != config.chain_id {
            anyhow::bail!(
                "RPC endpoint reports chain {} but config expects {}",
                chain_id,
                config.chain_id
            );
        }

        tracing::debug!(chain_id, signer = ?sender, "Market client connected");

        let submitter = AlloySubmitter::new(provider, sender, config.confirmations);
        Ok(Self::new(contracts, submitter))
    }
}
