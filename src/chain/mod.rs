// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! CrowdFunding contract integration.
//!
//! This module provides functionality for:
//! - Typed `createCampaign` / `donateToCampaign` contract bindings
//! - A tagged submission lifecycle (idle, submitting, pending, confirmed, failed)
//! - Transaction signing, broadcast, and confirmation polling

pub mod campaign;
pub mod client;
pub mod submission;

pub use campaign::{
    CampaignCategory, CampaignSpec, InvestmentTier, TeamMember, CROWDFUNDING_CONTRACT_ADDRESS,
};
pub use client::{parse_amount, ChainError, CrowdFundingClient, SubmissionReceipt};
pub use submission::{FailureReason, SubmissionFlow, SubmissionState, TransitionError};
