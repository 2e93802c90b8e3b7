// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! configuration structs resolved once at process start. Nothing reads the
//! environment ad hoc after startup; the resolved structs are passed into
//! the components that need them.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `IN_PRODUCTION` | `TRUE` selects the production MasChain API and credentials | unset (sandbox) |
//! | `MASCHAIN_CLIENT_KEY` | Production client id | Required in production |
//! | `MASCHAIN_CLIENT_SECRET` | Production client secret | Required in production |
//! | `MASCHAIN_TESTNET_CLIENT_KEY` | Sandbox client id | Required in sandbox |
//! | `MASCHAIN_TESTNET_CLIENT_SECRET` | Sandbox client secret | Required in sandbox |
//! | `MASCHAIN_API_URL` | Override the MasChain base URL | Per-environment default |
//! | `KYC_REDIRECT_URL` | Browser redirect after e-KYC completes | `https://localhost:5173/kyc/callback` |
//! | `DATA_DIR` | Directory holding the SQLite session store | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//! | `RPC_URL` | JSON-RPC endpoint for the chain binaries | Required by the binaries |
//! | `PRIVATE_KEY` | Hex-encoded signing key for the chain binaries | Required by the binaries |
//! | `CONTRACT_ADDRESS` | CrowdFunding contract address | Deployed address |

use std::path::PathBuf;

/// Environment variable name for the session store directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// File name of the SQLite database inside the data directory.
pub const SESSION_DB_FILE: &str = "sessions.db";

const MASCHAIN_PRODUCTION_URL: &str = "https://service.maschain.com";
const MASCHAIN_SANDBOX_URL: &str = "https://service-testnet.maschain.com";
const DEFAULT_KYC_REDIRECT_URL: &str = "https://localhost:5173/kyc/callback";

/// Which MasChain environment the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderEnvironment {
    Production,
    Sandbox,
}

/// Resolved MasChain API configuration.
///
/// Built once at startup and handed to the provider client constructor.
/// The production/sandbox toggle selects both the base URL and the
/// credential pair; running without credentials for the selected
/// environment is a startup error.
#[derive(Debug, Clone)]
pub struct MasChainConfig {
    pub environment: ProviderEnvironment,
    pub api_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

impl MasChainConfig {
    /// Resolve the MasChain configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = if env_optional("IN_PRODUCTION").as_deref() == Some("TRUE") {
            ProviderEnvironment::Production
        } else {
            ProviderEnvironment::Sandbox
        };

        let (default_url, id_var, secret_var) = match environment {
            ProviderEnvironment::Production => (
                MASCHAIN_PRODUCTION_URL,
                "MASCHAIN_CLIENT_KEY",
                "MASCHAIN_CLIENT_SECRET",
            ),
            ProviderEnvironment::Sandbox => (
                MASCHAIN_SANDBOX_URL,
                "MASCHAIN_TESTNET_CLIENT_KEY",
                "MASCHAIN_TESTNET_CLIENT_SECRET",
            ),
        };

        Ok(Self {
            environment,
            api_base_url: env_or_default("MASCHAIN_API_URL", default_url),
            client_id: env_required(id_var)?,
            client_secret: env_required(secret_var)?,
            redirect_url: env_or_default("KYC_REDIRECT_URL", DEFAULT_KYC_REDIRECT_URL),
        })
    }
}

/// Resolved server bind and storage configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env_or_default("PORT", "3000").parse().unwrap_or(3000);
        Self {
            host: env_or_default("HOST", "0.0.0.0"),
            port,
            data_dir: PathBuf::from(env_or_default(DATA_DIR_ENV, "./data")),
        }
    }

    /// Path of the SQLite session database inside the data directory.
    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_DB_FILE)
    }
}

/// Resolved configuration for the standalone chain binaries.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    /// Hex-encoded private key, with or without a `0x` prefix.
    pub private_key: String,
    pub contract_address: String,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            rpc_url: env_required("RPC_URL")?,
            private_key: env_required("PRIVATE_KEY")?,
            contract_address: env_or_default(
                "CONTRACT_ADDRESS",
                crate::chain::CROWDFUNDING_CONTRACT_ADDRESS,
            ),
        })
    }
}

pub(crate) fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

pub(crate) fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::MissingVar(name))
}

pub(crate) fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_default_falls_back() {
        assert_eq!(
            env_or_default("GIVEBRIDGE_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn env_optional_treats_blank_as_unset() {
        std::env::set_var("GIVEBRIDGE_TEST_BLANK_VAR", "   ");
        assert_eq!(env_optional("GIVEBRIDGE_TEST_BLANK_VAR"), None);
        std::env::remove_var("GIVEBRIDGE_TEST_BLANK_VAR");
    }

    #[test]
    fn session_db_path_joins_data_dir() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("/tmp/givebridge"),
        };
        assert_eq!(
            config.session_db_path(),
            PathBuf::from("/tmp/givebridge/sessions.db")
        );
    }
}
