// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! MasChain wallet-management and e-KYC REST integration.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::{CreatedWallet, IdentityProvider, NewWalletRequest, ProviderError, VerificationSession};
use crate::config::MasChainConfig;

const WALLET_CREATE_PATH: &str = "/api/wallet/create-user";
const EKYC_VERIFICATIONS_PATH: &str = "/api/ekyc/verifications";

/// Document-type code for a full e-KYC flow.
const EKYC_DOCUMENT_TYPE: &str = "00";
/// Issuing country of the accepted identity document.
const EKYC_ID_COUNTRY: &str = "MYS";
/// Accepted identity document kind.
const EKYC_ID_TYPE: &str = "ID_CARD";

/// MasChain REST client.
///
/// Holds the resolved [`MasChainConfig`] and a pooled HTTP client; no other
/// state. Every call attaches the client-id/client-secret credential pair
/// as headers, the way the MasChain API expects.
#[derive(Debug, Clone)]
pub struct MasChainClient {
    config: MasChainConfig,
    http: Client,
}

impl MasChainClient {
    pub fn new(config: MasChainConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Base URL of the configured MasChain environment.
    pub fn base_url(&self) -> &str {
        self.config.api_base_url.trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn credential_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("client_id", &self.config.client_id)
            .header("client_secret", &self.config.client_secret)
    }
}

impl IdentityProvider for MasChainClient {
    async fn create_wallet(
        &self,
        request: NewWalletRequest<'_>,
    ) -> Result<CreatedWallet, ProviderError> {
        let payload = json!({
            "name": request.name,
            "email": request.email,
            "ic": request.national_id,
        });

        let response = self
            .credential_headers(self.http.post(self.endpoint(WALLET_CREATE_PATH)))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("POST {WALLET_CREATE_PATH} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!(
                "POST {WALLET_CREATE_PATH} returned {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("POST {WALLET_CREATE_PATH} invalid JSON: {e}"))
        })?;

        let wallet_address = extract_wallet_address(&body).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "missing result.wallet.wallet_address in response: {body}"
            ))
        })?;

        info!(wallet_address = %wallet_address, "MasChain wallet created");

        Ok(CreatedWallet { wallet_address })
    }

    async fn start_verification(&self) -> Result<VerificationSession, ProviderError> {
        let payload = verification_payload(&self.config.redirect_url);

        let response = self
            .credential_headers(self.http.post(self.endpoint(EKYC_VERIFICATIONS_PATH)))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Request(format!("POST {EKYC_VERIFICATIONS_PATH} failed: {e}"))
            })?;

        let body: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!(
                "POST {EKYC_VERIFICATIONS_PATH} invalid JSON: {e}"
            ))
        })?;

        // MasChain reports the outcome in the body's status field, not only
        // in the HTTP status line.
        extract_verification_session(&body).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "eKYC session was not created, provider said: {body}"
            ))
        })
    }

    async fn verification_status(&self, token: &str) -> Result<bool, ProviderError> {
        let path = format!("{EKYC_VERIFICATIONS_PATH}/{token}");

        let response = self
            .credential_headers(self.http.get(self.endpoint(&path)))
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("GET {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!(
                "GET {path} returned {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("GET {path} invalid JSON: {e}"))
        })?;

        Ok(is_verified(&body))
    }
}

/// Build the fixed-parameter e-KYC session payload.
fn verification_payload(redirect_url: &str) -> Value {
    json!({
        "type": EKYC_DOCUMENT_TYPE,
        "id_country": EKYC_ID_COUNTRY,
        "id_type": EKYC_ID_TYPE,
        "redirect_url": redirect_url,
    })
}

fn extract_wallet_address(body: &Value) -> Option<String> {
    body.pointer("/result/wallet/wallet_address")
        .and_then(Value::as_str)
        .filter(|address| !address.trim().is_empty())
        .map(str::to_string)
}

/// Read the verification token and URL out of a session-creation response.
///
/// Returns None unless the body-level status is 200 and both fields are
/// present, mirroring how MasChain signals success.
fn extract_verification_session(body: &Value) -> Option<VerificationSession> {
    if body.get("status").and_then(Value::as_i64) != Some(200) {
        return None;
    }
    let token = body.pointer("/result/token").and_then(Value::as_str)?;
    let url = body.pointer("/result/url").and_then(Value::as_str)?;
    Some(VerificationSession {
        token: token.to_string(),
        url: url.to_string(),
    })
}

/// `result.is_success == 1` is verified; anything else, including an absent
/// field, is the pending state.
fn is_verified(body: &Value) -> bool {
    body.pointer("/result/is_success").and_then(Value::as_i64) == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_payload_has_fixed_document_parameters() {
        let payload = verification_payload("https://localhost:5173/kyc/callback");
        assert_eq!(payload["type"], "00");
        assert_eq!(payload["id_country"], "MYS");
        assert_eq!(payload["id_type"], "ID_CARD");
        assert_eq!(payload["redirect_url"], "https://localhost:5173/kyc/callback");
    }

    #[test]
    fn extract_wallet_address_reads_nested_field() {
        let body = json!({"result": {"wallet": {"wallet_address": "0xABC"}}});
        assert_eq!(extract_wallet_address(&body).as_deref(), Some("0xABC"));
    }

    #[test]
    fn extract_wallet_address_rejects_missing_or_blank() {
        assert!(extract_wallet_address(&json!({"result": {}})).is_none());
        assert!(
            extract_wallet_address(&json!({"result": {"wallet": {"wallet_address": "  "}}}))
                .is_none()
        );
    }

    #[test]
    fn extract_verification_session_requires_body_status_200() {
        let ok = json!({
            "status": 200,
            "result": {"token": "TOK1", "url": "https://verify/TOK1"}
        });
        let session = extract_verification_session(&ok).expect("session should parse");
        assert_eq!(session.token, "TOK1");
        assert_eq!(session.url, "https://verify/TOK1");

        let declined = json!({
            "status": 422,
            "result": {"token": "TOK1", "url": "https://verify/TOK1"}
        });
        assert!(extract_verification_session(&declined).is_none());
    }

    #[test]
    fn extract_verification_session_requires_token_and_url() {
        let missing_url = json!({"status": 200, "result": {"token": "TOK1"}});
        assert!(extract_verification_session(&missing_url).is_none());

        let missing_token = json!({"status": 200, "result": {"url": "https://verify"}});
        assert!(extract_verification_session(&missing_token).is_none());
    }

    #[test]
    fn is_verified_only_on_exact_success_flag() {
        assert!(is_verified(&json!({"result": {"is_success": 1}})));
        assert!(!is_verified(&json!({"result": {"is_success": 0}})));
        assert!(!is_verified(&json!({"result": {"is_success": "1"}})));
        assert!(!is_verified(&json!({"result": {}})));
        assert!(!is_verified(&json!({})));
    }
}
