// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

use std::{net::SocketAddr, sync::Arc};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use givebridge_rust_server::{
    api::router,
    config::{MasChainConfig, ServerConfig},
    kyc::KycService,
    providers::MasChainClient,
    state::AppState,
    storage::SessionStore,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // Refuse to start without credentials for the selected environment.
    let maschain_config = match MasChainConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    let server_config = ServerConfig::from_env();

    info!(
        environment = ?maschain_config.environment,
        api_base_url = %maschain_config.api_base_url,
        "MasChain environment selected"
    );

    let store = match SessionStore::open(server_config.session_db_path()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(
                path = %server_config.session_db_path().display(),
                "failed to open session store: {e}"
            );
            std::process::exit(1);
        }
    };

    let client = match MasChainClient::new(maschain_config) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build MasChain client: {e}");
            std::process::exit(1);
        }
    };
    let provider_base_url = client.base_url().to_string();

    let state = AppState::new(KycService::new(store, client), provider_base_url);
    let app = router(state);

    let addr: SocketAddr = match format!("{}:{}", server_config.host, server_config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(
                host = %server_config.host,
                port = server_config.port,
                "failed to parse bind address: {e}"
            );
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            std::process::exit(1);
        }
    };

    info!("Givebridge server listening on http://{addr} (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        std::process::exit(1);
    }
}

/// Resolve until ctrl-c so axum can drain in-flight requests.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => error!("failed to listen for shutdown signal: {e}"),
    }
}

/// Tracing output is `pretty` by default; `LOG_FORMAT=json` switches to
/// structured lines for log shippers.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
