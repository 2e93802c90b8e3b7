// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! NGO custodial wallet creation endpoint.

use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    models::{CreateWalletRequest, CreateWalletResponse, WalletAddress},
    state::AppState,
};

use super::map_kyc_error;

/// Create a MasChain custodial wallet for an NGO admin.
#[utoipa::path(
    post,
    path = "/api/wallet/create",
    tag = "Wallet",
    request_body = CreateWalletRequest,
    responses(
        (status = 200, description = "Wallet created", body = CreateWalletResponse),
        (status = 400, description = "Missing ngoName, adminEmail, or adminIc"),
        (status = 409, description = "NGO name already registered"),
        (status = 500, description = "Provider or store failure")
    )
)]
pub async fn create_wallet(
    State(state): State<AppState>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<Json<CreateWalletResponse>, ApiError> {
    let wallet_address = state
        .kyc
        .create_wallet(
            request.ngo_name.as_deref(),
            request.admin_email.as_deref(),
            request.admin_ic.as_deref(),
        )
        .await
        .map_err(map_kyc_error)?;

    Ok(Json(CreateWalletResponse {
        wallet_address: WalletAddress(wallet_address),
    }))
}
