// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! Submit a `createCampaign` transaction directly over JSON-RPC.
//!
//! # Running
//!
//! ```bash
//! RPC_URL=https://... PRIVATE_KEY=... cargo run --bin create-campaign
//! ```

use alloy::primitives::{Address, U256};
use tracing::{error, info};

use givebridge_rust_server::chain::{
    CampaignCategory, CampaignSpec, CrowdFundingClient, InvestmentTier, SubmissionFlow, TeamMember,
};
use givebridge_rust_server::config::ChainConfig;

/// Demo campaign payload submitted by this script.
fn demo_campaign() -> CampaignSpec {
    let campaign_owner: Address = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e"
        .parse()
        .expect("campaign owner address is valid");

    CampaignSpec {
        campaign_owner,
        title: "Access to Quality Education".to_string(),
        description: "Empowering futures through accessible education".to_string(),
        category: CampaignCategory::Education,
        project_description: "Providing educational resources and infrastructure to underserved \
            communities globally. Our mission is to create sustainable solutions that address \
            critical humanitarian needs while empowering local communities."
            .to_string(),
        // Goal in USDC (6 decimals): 1 000 000 USDC
        goal_amount: U256::from(1_000_000_000_000u64),
        image: "https://your-image-url.com/image.png".to_string(),
        team_members: vec![TeamMember {
            name: "Alice".to_string(),
            role: "Lead".to_string(),
            bio: "Expert in education".to_string(),
        }],
        investment_tiers: vec![
            InvestmentTier {
                tier_title: "Bronze".to_string(),
                minimum_amount: U256::from(1_000_000u64),
                description: "Thank you email".to_string(),
            },
            InvestmentTier {
                tier_title: "Silver".to_string(),
                minimum_amount: U256::from(5_000_000u64),
                description: "Special mention".to_string(),
            },
        ],
    }
}

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

    let signer = match CrowdFundingClient::create_signer(&config.private_key) {
        Ok(signer) => signer,
        Err(e) => {
            error!("invalid PRIVATE_KEY: {e}");
            std::process::exit(1);
        }
    };
    info!(signer = %signer.address(), contract = %config.contract_address, "submitting createCampaign");

    let client = match CrowdFundingClient::new(&config, signer) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build chain client: {e}");
            std::process::exit(1);
        }
    };

    let flow = SubmissionFlow::new();
    match client.submit_campaign(demo_campaign(), &flow).await {
        Ok(receipt) => {
            info!(
                tx_hash = %receipt.tx_hash,
                block_number = receipt.block_number,
                gas_used = receipt.gas_used,
                "campaign created"
            );
        }
        Err(e) => {
            error!("createCampaign failed: {e}");
            std::process::exit(1);
        }
    }
}
