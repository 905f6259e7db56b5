use alloy_primitives::U256;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use market_core::{Logger, MarketConfig, MarketError, RetryConfig, with_retry};
use nft_market::operations::{
    AddToAllowlist, CancelDutchAuctions, CancelEnglishAuctions, CancelListings,
    CreateDutchAuctions, CreateEnglishAuctions, CreateListings, RemoveFromAllowlist,
};
use nft_market::{BatchOperation, BatchOutcome, MarketClient};
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use zeroize::Zeroizing;

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch operations against the NFT marketplace", long_about = None)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, default_value = "config/config.toml", global = true)]
    config: String,

    /// Extra attempts after a network failure
    #[arg(short, long, default_value = "0", global = true)]
    retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create English auctions for several tokens of one collection
    EnglishCreate {
        #[arg(long)]
        collection: String,
        /// Comma-separated token ids
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        token_ids: Vec<U256>,
        #[arg(long)]
        starting_bid: String,
        /// Auction length in seconds
        #[arg(long)]
        duration: u64,
    },
    /// Cancel English auctions
    EnglishCancel {
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        auction_ids: Vec<U256>,
    },
    /// Create Dutch auctions with a descending price
    DutchCreate {
        #[arg(long)]
        collection: String,
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        token_ids: Vec<U256>,
        #[arg(long)]
        start_price: String,
        #[arg(long)]
        end_price: String,
        #[arg(long)]
        duration: u64,
    },
    /// Cancel Dutch auctions
    DutchCancel {
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        auction_ids: Vec<U256>,
    },
    /// List tokens at fixed prices, one price per token
    List {
        #[arg(long)]
        collection: String,
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        token_ids: Vec<U256>,
        #[arg(long, value_delimiter = ',')]
        prices: Vec<String>,
    },
    /// Cancel fixed-price listings
    CancelListings {
        #[arg(long, value_delimiter = ',', value_parser = parse_u256)]
        listing_ids: Vec<U256>,
    },
    /// Add accounts to a collection allowlist
    AllowlistAdd {
        #[arg(long)]
        collection: String,
        #[arg(long, value_delimiter = ',')]
        addresses: Vec<String>,
    },
    /// Remove accounts from a collection allowlist
    AllowlistRemove {
        #[arg(long)]
        collection: String,
        #[arg(long, value_delimiter = ',')]
        addresses: Vec<String>,
    },
}

fn parse_u256(s: &str) -> Result<U256, String> {
    s.trim()
        .parse::<U256>()
        .map_err(|e| format!("invalid id '{}': {}", s, e))
}

#[derive(Serialize)]
struct Report {
    operation: &'static str,
    tx_hash: String,
    ids: Vec<String>,
    expected: usize,
    complete: bool,
}

#[derive(Serialize)]
struct ErrorReport {
    operation: &'static str,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_hash: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let args = Args::parse();

    // Fall back to the crate-local config when run from the workspace root
    let config_path = if std::path::Path::new(&args.config).exists() {
        args.config.clone()
    } else if args.config == "config/config.toml"
        && std::path::Path::new("chains/nft-market/config/config.toml").exists()
    {
        "chains/nft-market/config/config.toml".to_string()
    } else {
        args.config.clone()
    };

    let config = MarketConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path))?;
    let _log_guard = Logger::new(&config.log)?.install_global()?;

    tracing::info!(rpc = %config.rpc_url, chain_id = config.chain_id, "Loaded config");

    let private_key = env::var("MARKET_PRIVATE_KEY").ok().map(Zeroizing::new);
    if private_key.is_none() {
        tracing::warn!("MARKET_PRIVATE_KEY not set, submissions will fail with NO_SIGNER");
    }

    let client = MarketClient::connect(&config, private_key.as_deref().map(String::as_str))
        .await
        .context("Failed to connect market client")?;
    let retry = RetryConfig::new(args.retries, 1000);

    let succeeded = match args.command {
        Command::EnglishCreate {
            collection,
            token_ids,
            starting_bid,
            duration,
        } => {
            let op = CreateEnglishAuctions {
                collection,
                token_ids,
                starting_bid,
                duration_secs: duration,
            };
            run(&client, &retry, &op).await
        }
        Command::EnglishCancel { auction_ids } => {
            run(&client, &retry, &CancelEnglishAuctions { auction_ids }).await
        }
        Command::DutchCreate {
            collection,
            token_ids,
            start_price,
            end_price,
            duration,
        } => {
            let op = CreateDutchAuctions {
                collection,
                token_ids,
                start_price,
                end_price,
                duration_secs: duration,
            };
            run(&client, &retry, &op).await
        }
        Command::DutchCancel { auction_ids } => {
            run(&client, &retry, &CancelDutchAuctions { auction_ids }).await
        }
        Command::List {
            collection,
            token_ids,
            prices,
        } => {
            let op = CreateListings {
                collection,
                token_ids,
                prices,
            };
            run(&client, &retry, &op).await
        }
        Command::CancelListings { listing_ids } => {
            run(&client, &retry, &CancelListings { listing_ids }).await
        }
        Command::AllowlistAdd {
            collection,
            addresses,
        } => {
            let op = AddToAllowlist {
                collection,
                addresses,
            };
            run(&client, &retry, &op).await
        }
        Command::AllowlistRemove {
            collection,
            addresses,
        } => {
            let op = RemoveFromAllowlist {
                collection,
                addresses,
            };
            run(&client, &retry, &op).await
        }
    }?;

    // Returning lets the log guard drop and flush buffered file output
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Executes one operation, prints a JSON report and returns whether it succeeded.
async fn run<O: BatchOperation>(
    client: &MarketClient,
    retry: &RetryConfig,
    op: &O,
) -> Result<bool> {
    let result: Result<BatchOutcome, MarketError> =
        with_retry(retry, O::NAME, || client.execute(op)).await;

    match result {
        Ok(outcome) => {
            if !outcome.is_complete() {
                tracing::warn!(
                    operation = O::NAME,
                    decoded = outcome.ids.len(),
                    expected = outcome.expected,
                    "Receipt did not yield one identifier per item"
                );
            }
            let report = Report {
                operation: O::NAME,
                tx_hash: format!("{:?}", outcome.receipt.hash),
                ids: outcome.ids.iter().map(|id| id.to_string()).collect(),
                expected: outcome.expected,
                complete: outcome.is_complete(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }
        Err(e) => {
            let report = ErrorReport {
                operation: O::NAME,
                code: e.code().as_str(),
                message: e.to_string(),
                tx_hash: e.tx_hash().map(str::to_string),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(false)
        }
    }
}
