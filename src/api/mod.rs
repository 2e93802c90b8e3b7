// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ApiError,
    kyc::KycError,
    models::{
        CreateWalletRequest, CreateWalletResponse, KycStatusResponse, ProviderUrlResponse,
        StartKycRequest, StartKycResponse, WalletAddress,
    },
    state::AppState,
    storage::StoreError,
};

pub mod health;
pub mod kyc;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/wallet/create", post(wallet::create_wallet))
        .route("/api/kyc/start", post(kyc::start_kyc))
        .route("/api/kyc/status/{wallet_address}", get(kyc::kyc_status))
        .route("/api/test/maschain-url", get(health::maschain_url))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Convert orchestration failures into HTTP responses.
///
/// Validation errors are the caller's to fix (400); provider failures
/// carry the provider's message as details (500); a duplicate NGO name is
/// a conflict (409).
pub(crate) fn map_kyc_error(error: KycError) -> ApiError {
    match error {
        KycError::Validation(message) => ApiError::bad_request(message),
        KycError::Provider(provider_error) => {
            ApiError::internal("identity provider request failed")
                .with_details(provider_error.to_string())
        }
        KycError::Store(StoreError::Duplicate(name)) => {
            ApiError::conflict(format!("NGO `{name}` is already registered"))
        }
        KycError::Store(store_error) => {
            ApiError::internal(format!("session store failure: {store_error}"))
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        wallet::create_wallet,
        kyc::start_kyc,
        kyc::kyc_status,
        health::maschain_url,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            WalletAddress,
            CreateWalletRequest,
            CreateWalletResponse,
            StartKycRequest,
            StartKycResponse,
            KycStatusResponse,
            ProviderUrlResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Wallet", description = "NGO custodial wallet creation"),
        (name = "KYC", description = "e-KYC verification flow"),
        (name = "Health", description = "Service health and diagnostics")
    )
)]
struct ApiDoc;
