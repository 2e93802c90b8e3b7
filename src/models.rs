// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Field names are camelCase on the wire, matching what the
//! browser frontend sends.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// MasChain-issued wallet address wrapper.
///
/// Provides type safety for wallet addresses throughout the API. This is
/// the identity-provider custodial wallet, distinct from any browser-
/// connected chain wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Wallet Creation Models
// =============================================================================

/// Request to create an NGO custodial wallet.
///
/// Fields are optional at the deserialization layer so that missing input
/// surfaces as a 400 validation error rather than a deserialization
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    /// Organization name; primary key of the NGO session.
    pub ngo_name: Option<String>,
    /// Admin contact email.
    pub admin_email: Option<String>,
    /// Admin national identity number.
    pub admin_ic: Option<String>,
}

/// Response carrying the provider-issued wallet address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletResponse {
    pub wallet_address: WalletAddress,
}

// =============================================================================
// e-KYC Models
// =============================================================================

/// Request to start e-KYC for a previously created wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartKycRequest {
    pub wallet_address: Option<String>,
}

/// Response carrying the verification URL the browser is redirected to.
///
/// The verification token never leaves the server; only the URL does.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartKycResponse {
    pub verification_url: String,
}

/// Current verification status for a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KycStatusResponse {
    pub is_kyc_verified: bool,
}

/// Diagnostic response exposing the active MasChain base URL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUrlResponse {
    pub maschain_api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_from_and_into_string() {
        let from_str: WalletAddress = "abc".into();
        assert_eq!(from_str.0, "abc");

        let from_string: WalletAddress = String::from("def").into();
        assert_eq!(from_string.0, "def");

        let to_string: String = WalletAddress("ghi".into()).into();
        assert_eq!(to_string, "ghi");
    }

    #[test]
    fn create_wallet_request_uses_camel_case() {
        let request: CreateWalletRequest = serde_json::from_str(
            r#"{"ngoName":"Acme Relief","adminEmail":"a@x.org","adminIc":"900101-01-1234"}"#,
        )
        .unwrap();
        assert_eq!(request.ngo_name.as_deref(), Some("Acme Relief"));
        assert_eq!(request.admin_email.as_deref(), Some("a@x.org"));
        assert_eq!(request.admin_ic.as_deref(), Some("900101-01-1234"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let request: CreateWalletRequest =
            serde_json::from_str(r#"{"ngoName":"Acme Relief"}"#).unwrap();
        assert!(request.admin_email.is_none());
        assert!(request.admin_ic.is_none());
    }

    #[test]
    fn kyc_status_serializes_camel_case() {
        let body = serde_json::to_string(&KycStatusResponse {
            is_kyc_verified: true,
        })
        .unwrap();
        assert_eq!(body, r#"{"isKycVerified":true}"#);
    }
}
