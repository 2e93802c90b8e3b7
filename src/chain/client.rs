// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! CrowdFunding contract client: signing, broadcast, and confirmation.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, B256, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, PendingTransactionBuilder, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};
use tracing::info;

use super::campaign::{CampaignSpec, ICrowdFunding};
use super::submission::{FailureReason, SubmissionFlow, TransitionError};
use crate::config::ChainConfig;

/// HTTP provider type with gas/nonce/chain-id fillers and a signing wallet.
type SignerProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Summary of a confirmed submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub gas_used: u64,
}

/// CrowdFunding contract client.
///
/// Walks a [`SubmissionFlow`] through signature, broadcast, and receipt
/// polling for each call, so observers can track the lifecycle while the
/// call is in flight.
pub struct CrowdFundingClient {
    contract_address: Address,
    provider: SignerProvider,
}

impl CrowdFundingClient {
    /// Create a new client against the configured RPC endpoint.
    pub fn new(config: &ChainConfig, signer: PrivateKeySigner) -> Result<Self, ChainError> {
        let url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let contract_address = Address::from_str(&config.contract_address)
            .map_err(|e| ChainError::InvalidAddress(e.to_string()))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url);

        Ok(Self {
            contract_address,
            provider,
        })
    }

    /// Create a signer from a hex-encoded private key.
    ///
    /// Accepts the key with or without a `0x` prefix.
    pub fn create_signer(private_key_hex: &str) -> Result<PrivateKeySigner, ChainError> {
        let key_bytes = alloy::hex::decode(private_key_hex.trim_start_matches("0x"))
            .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))
    }

    /// Submit a `createCampaign` call and wait for confirmation.
    pub async fn submit_campaign(
        &self,
        spec: CampaignSpec,
        flow: &SubmissionFlow,
    ) -> Result<SubmissionReceipt, ChainError> {
        flow.begin()?;

        let contract = ICrowdFunding::new(self.contract_address, self.provider.clone());
        let team_members = spec.sol_team_members();
        let investment_tiers = spec.sol_investment_tiers();
        let sent = contract
            .createCampaign(
                spec.campaign_owner,
                spec.title,
                spec.description,
                spec.category.code(),
                spec.project_description,
                spec.goal_amount,
                spec.image,
                team_members,
                investment_tiers,
            )
            .send()
            .await;

        self.drive(flow, sent).await
    }

    /// Submit a `donateToCampaign` call carrying `amount_wei` of native
    /// value and wait for confirmation.
    pub async fn submit_donation(
        &self,
        campaign_id: u64,
        amount_wei: U256,
        flow: &SubmissionFlow,
    ) -> Result<SubmissionReceipt, ChainError> {
        flow.begin()?;

        let contract = ICrowdFunding::new(self.contract_address, self.provider.clone());
        let sent = contract
            .donateToCampaign(U256::from(campaign_id))
            .value(amount_wei)
            .send()
            .await;

        self.drive(flow, sent).await
    }

    /// Walk a broadcast attempt through the flow and poll for its receipt.
    async fn drive(
        &self,
        flow: &SubmissionFlow,
        sent: Result<PendingTransactionBuilder<Ethereum>, alloy::contract::Error>,
    ) -> Result<SubmissionReceipt, ChainError> {
        let pending = match sent {
            Ok(pending) => pending,
            Err(e) => {
                let reason = classify_send_failure(&e.to_string());
                flow.fail(reason.clone())?;
                return Err(ChainError::Submission(reason));
            }
        };

        let tx_hash = *pending.tx_hash();
        flow.broadcast(tx_hash)?;
        info!(tx_hash = %tx_hash, "transaction broadcast");

        let receipt = match pending.get_receipt().await {
            Ok(receipt) => receipt,
            Err(e) => {
                let reason = FailureReason::Rpc(e.to_string());
                flow.fail(reason.clone())?;
                return Err(ChainError::Submission(reason));
            }
        };

        if !receipt.status() {
            let reason = FailureReason::Reverted(format!("transaction {tx_hash} reverted"));
            flow.fail(reason.clone())?;
            return Err(ChainError::Submission(reason));
        }

        let block_number = receipt.block_number.unwrap_or(0);
        flow.confirm(block_number)?;
        info!(tx_hash = %tx_hash, block_number, "transaction confirmed");

        Ok(SubmissionReceipt {
            tx_hash,
            block_number,
            gas_used: receipt.gas_used as u64,
        })
    }
}

/// Decide why a broadcast attempt failed from the transport error text.
///
/// A declined signature is surfaced differently to the caller than an
/// unreachable or failing RPC endpoint.
fn classify_send_failure(message: &str) -> FailureReason {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("rejected") || lowered.contains("denied") {
        FailureReason::Rejected(message.to_string())
    } else {
        FailureReason::Rpc(message.to_string())
    }
}

/// Parse a human-readable amount to wei (or token units).
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for native value, 6 for USDC)
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, ChainError> {
    let parts: Vec<&str> = amount.split('.').collect();

    if parts.len() > 2 {
        return Err(ChainError::InvalidAmount(
            "invalid amount format".to_string(),
        ));
    }

    let whole = parts[0]
        .parse::<u128>()
        .map_err(|_| ChainError::InvalidAmount("invalid whole number".to_string()))?;

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(ChainError::InvalidAmount(format!(
                "too many decimal places (max {decimals})"
            )));
        }
        // Pad with zeros to match decimals
        let padded = format!("{:0<width$}", dec_str, width = decimals as usize);
        padded
            .parse::<u128>()
            .map_err(|_| ChainError::InvalidAmount("invalid decimal".to_string()))?
    } else {
        0u128
    };

    let multiplier = 10u128.pow(decimals as u32);
    let total = whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| ChainError::InvalidAmount("amount overflow".to_string()))?;

    Ok(U256::from(total))
}

/// Errors that can occur during chain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0}")]
    Submission(FailureReason),

    #[error(transparent)]
    State(#[from] TransitionError),
}
