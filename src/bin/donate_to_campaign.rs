// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! Submit a `donateToCampaign` transaction directly over JSON-RPC.
//!
//! # Running
//!
//! ```bash
//! RPC_URL=https://... PRIVATE_KEY=... cargo run --bin donate-to-campaign
//! ```

use tracing::{error, info};

use givebridge_rust_server::chain::{parse_amount, CrowdFundingClient, SubmissionFlow};
use givebridge_rust_server::config::ChainConfig;

/// Campaign to donate to.
const CAMPAIGN_ID: u64 = 0;

/// Donation in the chain's native token.
const DONATION_AMOUNT: &str = "0.01";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().expect("default filter is valid")),
        )
        .init();

    let config = match ChainConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let amount_wei = match parse_amount(DONATION_AMOUNT, 18) {
        Ok(amount) => amount,
        Err(e) => {
            error!("invalid donation amount: {e}");
            std::process::exit(1);
        }
    };

    let signer = match CrowdFundingClient::create_signer(&config.private_key) {
        Ok(signer) => signer,
        Err(e) => {
            error!("invalid PRIVATE_KEY: {e}");
            std::process::exit(1);
        }
    };
    info!(
        signer = %signer.address(),
        contract = %config.contract_address,
        campaign_id = CAMPAIGN_ID,
        amount = DONATION_AMOUNT,
        "submitting donateToCampaign"
    );

    let client = match CrowdFundingClient::new(&config, signer) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build chain client: {e}");
            std::process::exit(1);
        }
    };

    let flow = SubmissionFlow::new();
    match client
        .submit_donation(CAMPAIGN_ID, amount_wei, &flow)
        .await
    {
        Ok(receipt) => {
            info!(
                tx_hash = %receipt.tx_hash,
                block_number = receipt.block_number,
                gas_used = receipt.gas_used,
                "donation sent"
            );
        }
        Err(e) => {
            error!("donateToCampaign failed: {e}");
            std::process::exit(1);
        }
    }
}
