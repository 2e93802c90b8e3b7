// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! e-KYC orchestration.
//!
//! Composes the identity provider client and the session store into the
//! three operations the onboarding flow needs. Per NGO the flow moves
//! through: no wallet, wallet created, verification pending, verified.
//! Polling while pending does not transition; the verified flag is one-way.

use std::sync::Arc;

use tracing::info;

use crate::providers::{IdentityProvider, NewWalletRequest, ProviderError};
use crate::storage::{NewNgoSession, SessionStore, StoreError};

/// Failure of a KYC orchestration operation.
#[derive(Debug, thiserror::Error)]
pub enum KycError {
    /// Caller-supplied input was missing or blank. Recoverable by the
    /// caller correcting the request.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates wallet creation, e-KYC start, and status polling.
///
/// Generic over the provider so tests can substitute a stub; production
/// uses [`crate::providers::MasChainClient`].
pub struct KycService<P> {
    store: Arc<SessionStore>,
    provider: P,
}

impl<P: IdentityProvider> KycService<P> {
    pub fn new(store: Arc<SessionStore>, provider: P) -> Self {
        Self { store, provider }
    }

    /// Create a custodial wallet for an NGO and persist the session row.
    ///
    /// Nothing is persisted when the provider call fails. Returns the
    /// provider-issued wallet address.
    pub async fn create_wallet(
        &self,
        ngo_name: Option<&str>,
        admin_email: Option<&str>,
        admin_ic: Option<&str>,
    ) -> Result<String, KycError> {
        let name = required(ngo_name, "ngoName")?;
        let email = required(admin_email, "adminEmail")?;
        let national_id = required(admin_ic, "adminIc")?;

        let created = self
            .provider
            .create_wallet(NewWalletRequest {
                name,
                email,
                national_id,
            })
            .await?;

        self.store.insert_ngo_session(&NewNgoSession {
            name,
            email,
            national_id,
            provider_wallet_address: &created.wallet_address,
        })?;

        info!(ngo = %name, wallet_address = %created.wallet_address, "NGO session created");

        Ok(created.wallet_address)
    }

    /// Open an e-KYC session for a wallet and persist the token mapping.
    ///
    /// Returns the verification URL for browser redirection; the token
    /// stays server-side. Nothing is persisted when the provider call
    /// fails.
    pub async fn start_verification(
        &self,
        wallet_address: Option<&str>,
    ) -> Result<String, KycError> {
        let wallet = required(wallet_address, "walletAddress")?;

        let session = self.provider.start_verification().await?;
        self.store.upsert_kyc_session(&session.token, wallet)?;

        info!(wallet_address = %wallet, "eKYC verification started");

        Ok(session.url)
    }

    /// Poll the verification status for a wallet.
    ///
    /// A wallet that never started verification reports unverified without
    /// asking the provider. When the provider reports success the
    /// persisted flag flips true before returning; provider failures
    /// propagate rather than reading as "not verified".
    pub async fn poll_status(&self, wallet_address: Option<&str>) -> Result<bool, KycError> {
        let wallet = required(wallet_address, "walletAddress")?;

        let Some(token) = self.store.find_kyc_session_by_wallet(wallet)? else {
            return Ok(false);
        };

        let verified = self.provider.verification_status(&token).await?;
        if verified {
            self.store.mark_kyc_verified(wallet)?;
            info!(wallet_address = %wallet, "eKYC verification completed");
        }
        Ok(verified)
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, KycError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(KycError::Validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{CreatedWallet, VerificationSession};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scriptable identity provider for orchestration tests.
    struct StubProvider {
        wallet_address: Option<String>,
        session: Option<VerificationSession>,
        status: Option<bool>,
        status_calls: AtomicUsize,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                wallet_address: None,
                session: None,
                status: None,
                status_calls: AtomicUsize::new(0),
            }
        }

        fn with_wallet(mut self, address: &str) -> Self {
            self.wallet_address = Some(address.to_string());
            self
        }

        fn with_session(mut self, token: &str, url: &str) -> Self {
            self.session = Some(VerificationSession {
                token: token.to_string(),
                url: url.to_string(),
            });
            self
        }

        fn with_status(mut self, verified: bool) -> Self {
            self.status = Some(verified);
            self
        }
    }

    impl IdentityProvider for StubProvider {
        async fn create_wallet(
            &self,
            _request: NewWalletRequest<'_>,
        ) -> Result<CreatedWallet, ProviderError> {
            match &self.wallet_address {
                Some(address) => Ok(CreatedWallet {
                    wallet_address: address.clone(),
                }),
                None => Err(ProviderError::Request("provider is down".to_string())),
            }
        }

        async fn start_verification(&self) -> Result<VerificationSession, ProviderError> {
            match &self.session {
                Some(session) => Ok(session.clone()),
                None => Err(ProviderError::InvalidResponse(
                    "eKYC session was not created".to_string(),
                )),
            }
        }

        async fn verification_status(&self, _token: &str) -> Result<bool, ProviderError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(verified) => Ok(verified),
                None => Err(ProviderError::Request("provider is down".to_string())),
            }
        }
    }

    fn service(provider: StubProvider) -> (KycService<StubProvider>, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());
        (KycService::new(store.clone(), provider), store)
    }

    #[tokio::test]
    async fn create_wallet_persists_one_row_and_returns_address() {
        let (service, store) = service(StubProvider::new().with_wallet("0xABC"));

        let address = service
            .create_wallet(Some("Acme Relief"), Some("a@x.org"), Some("900101-01-1234"))
            .await
            .unwrap();

        assert_eq!(address, "0xABC");
        assert_eq!(store.ngo_session_count().unwrap(), 1);
        let session = store.ngo_session_by_wallet("0xABC").unwrap().unwrap();
        assert_eq!(session.name, "Acme Relief");
    }

    #[tokio::test]
    async fn create_wallet_with_missing_email_persists_nothing() {
        let (service, store) = service(StubProvider::new().with_wallet("0xABC"));

        let err = service
            .create_wallet(Some("Acme Relief"), None, Some("900101-01-1234"))
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::Validation(ref m) if m.contains("adminEmail")));
        assert_eq!(store.ngo_session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_wallet_rejects_blank_inputs() {
        let (service, store) = service(StubProvider::new().with_wallet("0xABC"));

        let err = service
            .create_wallet(Some("   "), Some("a@x.org"), Some("900101-01-1234"))
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::Validation(_)));
        assert_eq!(store.ngo_session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_wallet_provider_failure_persists_nothing() {
        let (service, store) = service(StubProvider::new());

        let err = service
            .create_wallet(Some("Acme Relief"), Some("a@x.org"), Some("900101-01-1234"))
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::Provider(_)));
        assert_eq!(store.ngo_session_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_wallet_duplicate_name_surfaces_conflict() {
        let (service, _store) = service(StubProvider::new().with_wallet("0xABC"));

        service
            .create_wallet(Some("Acme Relief"), Some("a@x.org"), Some("900101-01-1234"))
            .await
            .unwrap();
        let err = service
            .create_wallet(Some("Acme Relief"), Some("b@x.org"), Some("900101-01-9999"))
            .await
            .unwrap_err();

        assert!(matches!(err, KycError::Store(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn start_verification_maps_token_and_returns_url() {
        let (service, store) =
            service(StubProvider::new().with_session("TOK1", "https://verify/TOK1"));

        let url = service.start_verification(Some("0xABC")).await.unwrap();

        assert_eq!(url, "https://verify/TOK1");
        assert_eq!(
            store.find_kyc_session_by_wallet("0xABC").unwrap().as_deref(),
            Some("TOK1")
        );
    }

    #[tokio::test]
    async fn second_start_verification_wins() {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());

        let first = KycService::new(
            store.clone(),
            StubProvider::new().with_session("TOK1", "https://verify/TOK1"),
        );
        first.start_verification(Some("0xABC")).await.unwrap();

        let second = KycService::new(
            store.clone(),
            StubProvider::new().with_session("TOK2", "https://verify/TOK2"),
        );
        second.start_verification(Some("0xABC")).await.unwrap();

        assert_eq!(
            store.find_kyc_session_by_wallet("0xABC").unwrap().as_deref(),
            Some("TOK2")
        );
    }

    #[tokio::test]
    async fn start_verification_provider_failure_persists_nothing() {
        let (service, store) = service(StubProvider::new());

        let err = service.start_verification(Some("0xABC")).await.unwrap_err();

        assert!(matches!(err, KycError::Provider(_)));
        assert!(store.find_kyc_session_by_wallet("0xABC").unwrap().is_none());
    }

    #[tokio::test]
    async fn start_verification_requires_wallet_address() {
        let (service, _store) =
            service(StubProvider::new().with_session("TOK1", "https://verify/TOK1"));

        let err = service.start_verification(None).await.unwrap_err();
        assert!(matches!(err, KycError::Validation(ref m) if m.contains("walletAddress")));
    }

    #[tokio::test]
    async fn poll_without_prior_verification_never_calls_provider() {
        let (service, _store) = service(StubProvider::new().with_status(true));

        let verified = service.poll_status(Some("0xABC")).await.unwrap();

        assert!(!verified);
        assert_eq!(service.provider.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn poll_success_flips_persisted_flag() {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());
        store
            .insert_ngo_session(&NewNgoSession {
                name: "Acme Relief",
                email: "a@x.org",
                national_id: "900101-01-1234",
                provider_wallet_address: "0xABC",
            })
            .unwrap();
        store.upsert_kyc_session("TOK1", "0xABC").unwrap();

        let service = KycService::new(store.clone(), StubProvider::new().with_status(true));
        let verified = service.poll_status(Some("0xABC")).await.unwrap();

        assert!(verified);
        let session = store.ngo_session_by_wallet("0xABC").unwrap().unwrap();
        assert!(session.is_kyc_verified);
    }

    #[tokio::test]
    async fn poll_pending_leaves_flag_unset() {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());
        store
            .insert_ngo_session(&NewNgoSession {
                name: "Acme Relief",
                email: "a@x.org",
                national_id: "900101-01-1234",
                provider_wallet_address: "0xABC",
            })
            .unwrap();
        store.upsert_kyc_session("TOK1", "0xABC").unwrap();

        let service = KycService::new(store.clone(), StubProvider::new().with_status(false));
        let verified = service.poll_status(Some("0xABC")).await.unwrap();

        assert!(!verified);
        let session = store.ngo_session_by_wallet("0xABC").unwrap().unwrap();
        assert!(!session.is_kyc_verified);
    }

    #[tokio::test]
    async fn verified_flag_is_monotonic_across_polls() {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());
        store
            .insert_ngo_session(&NewNgoSession {
                name: "Acme Relief",
                email: "a@x.org",
                national_id: "900101-01-1234",
                provider_wallet_address: "0xABC",
            })
            .unwrap();
        store.upsert_kyc_session("TOK1", "0xABC").unwrap();

        let verify = KycService::new(store.clone(), StubProvider::new().with_status(true));
        assert!(verify.poll_status(Some("0xABC")).await.unwrap());

        // Even if the provider later reports pending, the persisted flag
        // stays true.
        let regress = KycService::new(store.clone(), StubProvider::new().with_status(false));
        assert!(!regress.poll_status(Some("0xABC")).await.unwrap());
        let session = store.ngo_session_by_wallet("0xABC").unwrap().unwrap();
        assert!(session.is_kyc_verified);
    }

    #[tokio::test]
    async fn poll_provider_failure_propagates_instead_of_reporting_unverified() {
        let store = Arc::new(SessionStore::open_in_memory().unwrap());
        store.upsert_kyc_session("TOK1", "0xABC").unwrap();

        let service = KycService::new(store, StubProvider::new());
        let err = service.poll_status(Some("0xABC")).await.unwrap_err();

        assert!(matches!(err, KycError::Provider(_)));
    }
}
