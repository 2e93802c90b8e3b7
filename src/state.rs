// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

use std::sync::Arc;

use crate::kyc::KycService;
use crate::providers::MasChainClient;

#[derive(Clone)]
pub struct AppState {
    pub kyc: Arc<KycService<MasChainClient>>,
    /// Active MasChain base URL, exposed by the diagnostics endpoint.
    pub provider_base_url: String,
}

impl AppState {
    pub fn new(kyc: KycService<MasChainClient>, provider_base_url: impl Into<String>) -> Self {
        Self {
            kyc: Arc::new(kyc),
            provider_base_url: provider_base_url.into(),
        }
    }
}
