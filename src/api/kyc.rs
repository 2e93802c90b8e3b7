// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! e-KYC start and status-poll endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{KycStatusResponse, StartKycRequest, StartKycResponse},
    state::AppState,
};

use super::map_kyc_error;

/// Start an e-KYC verification session for a wallet.
///
/// The response carries only the verification URL; the token stays
/// server-side.
#[utoipa::path(
    post,
    path = "/api/kyc/start",
    tag = "KYC",
    request_body = StartKycRequest,
    responses(
        (status = 200, description = "Verification session created", body = StartKycResponse),
        (status = 400, description = "Missing walletAddress"),
        (status = 500, description = "Provider failure")
    )
)]
pub async fn start_kyc(
    State(state): State<AppState>,
    Json(request): Json<StartKycRequest>,
) -> Result<Json<StartKycResponse>, ApiError> {
    let verification_url = state
        .kyc
        .start_verification(request.wallet_address.as_deref())
        .await
        .map_err(map_kyc_error)?;

    Ok(Json(StartKycResponse { verification_url }))
}

/// Poll the e-KYC status for a wallet.
///
/// A wallet with no verification session reports unverified; that is a
/// normal outcome, not an error.
#[utoipa::path(
    get,
    path = "/api/kyc/status/{wallet_address}",
    tag = "KYC",
    params(
        ("wallet_address" = String, Path, description = "MasChain wallet address")
    ),
    responses(
        (status = 200, description = "Current verification status", body = KycStatusResponse),
        (status = 500, description = "Provider failure during active poll")
    )
)]
pub async fn kyc_status(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    let is_kyc_verified = state
        .kyc
        .poll_status(Some(&wallet_address))
        .await
        .map_err(map_kyc_error)?;

    Ok(Json(KycStatusResponse { is_kyc_verified }))
}
