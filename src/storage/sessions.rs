// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! SQLite-backed session store for NGO and KYC linkage rows.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::{StoreError, StoreResult};

/// A persisted NGO registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NgoSession {
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub provider_wallet_address: String,
    pub chain_wallet_address: Option<String>,
    pub verification_token: Option<String>,
    pub is_kyc_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new NGO session row, written at wallet-creation time.
pub struct NewNgoSession<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub national_id: &'a str,
    pub provider_wallet_address: &'a str,
}

/// Durable store for NGO sessions and KYC verification-token mappings.
///
/// The connection is serialized behind a mutex; each public operation is
/// one atomic statement or transaction against the database.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    /// Open (or create) the store at `path`, creating parent directories
    /// and the schema as needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::initialize(Connection::open(path)?)
    }

    /// Open an in-memory store. Used by tests and local tooling.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ngo_sessions (
                name                    TEXT PRIMARY KEY,
                email                   TEXT NOT NULL,
                national_id             TEXT NOT NULL,
                provider_wallet_address TEXT NOT NULL,
                chain_wallet_address    TEXT,
                verification_token      TEXT UNIQUE,
                is_kyc_verified         INTEGER NOT NULL DEFAULT 0,
                created_at              TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS kyc_sessions (
                verification_token TEXT PRIMARY KEY,
                wallet_address     TEXT NOT NULL UNIQUE,
                created_at         TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))
    }

    /// Insert a new NGO session row.
    ///
    /// Fails with [`StoreError::Duplicate`] when the organization name is
    /// already registered.
    pub fn insert_ngo_session(&self, session: &NewNgoSession<'_>) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO ngo_sessions \
             (name, email, national_id, provider_wallet_address, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.name,
                session.email,
                session.national_id,
                session.provider_wallet_address,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::Duplicate(session.name.to_string())
            }
            other => StoreError::Sqlite(other),
        })?;
        Ok(())
    }

    /// Insert or replace the verification-token mapping for a wallet.
    ///
    /// Both columns are unique, so `INSERT OR REPLACE` evicts any previous
    /// attempt for the same wallet as well as any stale row for the same
    /// token: the latest `start verification` call wins. The matching NGO
    /// session has its token attached in the same transaction.
    pub fn upsert_kyc_session(&self, verification_token: &str, wallet_address: &str) -> StoreResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO kyc_sessions (verification_token, wallet_address, created_at) \
             VALUES (?1, ?2, ?3)",
            params![verification_token, wallet_address, Utc::now().to_rfc3339()],
        )?;
        tx.execute(
            "UPDATE ngo_sessions SET verification_token = ?1 WHERE provider_wallet_address = ?2",
            params![verification_token, wallet_address],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Look up the verification token for a wallet, if e-KYC was started.
    pub fn find_kyc_session_by_wallet(&self, wallet_address: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT verification_token FROM kyc_sessions WHERE wallet_address = ?1")?;
        let token = stmt
            .query_row([wallet_address], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(token)
    }

    /// Flip the verified flag for the NGO session owning `wallet_address`.
    ///
    /// A no-op when no session matches; the flag is never reset by this
    /// flow once set.
    pub fn mark_kyc_verified(&self, wallet_address: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE ngo_sessions SET is_kyc_verified = 1 WHERE provider_wallet_address = ?1",
            [wallet_address],
        )?;
        Ok(())
    }

    /// Read back the NGO session owning `wallet_address`.
    pub fn ngo_session_by_wallet(&self, wallet_address: &str) -> StoreResult<Option<NgoSession>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT name, email, national_id, provider_wallet_address, chain_wallet_address, \
             verification_token, is_kyc_verified, created_at \
             FROM ngo_sessions WHERE provider_wallet_address = ?1",
        )?;
        let session = stmt
            .query_row([wallet_address], |row| {
                let created_at: String = row.get(7)?;
                Ok(NgoSession {
                    name: row.get(0)?,
                    email: row.get(1)?,
                    national_id: row.get(2)?,
                    provider_wallet_address: row.get(3)?,
                    chain_wallet_address: row.get(4)?,
                    verification_token: row.get(5)?,
                    is_kyc_verified: row.get::<_, i64>(6)? != 0,
                    created_at: created_at.parse::<DateTime<Utc>>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            7,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?,
                })
            })
            .optional()?;
        Ok(session)
    }

    /// Number of NGO session rows. Used by tests asserting all-or-nothing
    /// persistence.
    pub fn ngo_session_count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM ngo_sessions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
