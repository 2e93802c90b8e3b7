// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! # Session Storage Module
//!
//! Durable persistence for NGO onboarding state, backed by a local SQLite
//! database. The schema is created idempotently when the store opens.
//!
//! ## Schema
//!
//! ```text
//! ngo_sessions
//!   name                     TEXT PRIMARY KEY   -- organization name
//!   email                    TEXT
//!   national_id              TEXT
//!   provider_wallet_address  TEXT               -- MasChain custodial wallet
//!   chain_wallet_address     TEXT               -- browser-connected wallet, set elsewhere
//!   verification_token       TEXT UNIQUE        -- attached when e-KYC starts
//!   is_kyc_verified          INTEGER DEFAULT 0  -- one-way flag
//!   created_at               TEXT
//!
//! kyc_sessions
//!   verification_token       TEXT PRIMARY KEY
//!   wallet_address           TEXT UNIQUE        -- provider wallet, one live attempt each
//!   created_at               TEXT
//! ```
//!
//! Every operation is a single atomic statement or transaction; callers
//! must not assume read-then-write sequences across calls are atomic.

pub mod sessions;

pub use sessions::{NewNgoSession, NgoSession, SessionStore};

/// Storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (e.g. re-registering an NGO name).
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
