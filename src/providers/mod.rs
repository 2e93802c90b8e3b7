// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! Identity provider integration.
//!
//! The [`IdentityProvider`] trait is the seam between the KYC orchestration
//! service and the outside world; [`maschain::MasChainClient`] is the
//! production implementation, and tests substitute stubs.

pub mod maschain;

pub use maschain::MasChainClient;

use std::future::Future;

/// Failure talking to the identity provider.
///
/// Transport failures and malformed payloads are the same failure kind as
/// far as callers are concerned; the variants exist only so the message
/// names what went wrong. All of them surface as a 500-equivalent with the
/// provider details attached.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("MasChain configuration invalid: {0}")]
    Config(String),

    #[error("MasChain request failed: {0}")]
    Request(String),

    #[error("MasChain response was invalid: {0}")]
    InvalidResponse(String),
}

/// Parameters for provider-side wallet creation.
pub struct NewWalletRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub national_id: &'a str,
}

/// Provider-issued custodial wallet.
#[derive(Debug, Clone)]
pub struct CreatedWallet {
    pub wallet_address: String,
}

/// One e-KYC verification attempt issued by the provider.
///
/// `token` identifies the attempt for later status polls and stays
/// server-side; `url` is handed to the browser for redirection.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    pub token: String,
    pub url: String,
}

/// Operations the KYC orchestration needs from an identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Create a custodial wallet for an NGO admin.
    fn create_wallet(
        &self,
        request: NewWalletRequest<'_>,
    ) -> impl Future<Output = Result<CreatedWallet, ProviderError>> + Send;

    /// Open a new e-KYC verification session.
    fn start_verification(
        &self,
    ) -> impl Future<Output = Result<VerificationSession, ProviderError>> + Send;

    /// Poll a verification attempt. `Ok(false)` is the valid pending state,
    /// not an error; errors mean the provider could not be asked.
    fn verification_status(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<bool, ProviderError>> + Send;
}
