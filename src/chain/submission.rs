// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! Transaction submission lifecycle.
//!
//! One tagged state per submission replaces juggling independent
//! pending/confirming/confirmed/error flags, so impossible combinations
//! cannot be represented. The transaction hash becomes visible the moment
//! the broadcast is accepted, before confirmation.

use alloy::primitives::B256;
use tokio::sync::watch;

/// Why a submission failed.
///
/// A signer refusing to sign is not the same failure as an on-chain
/// revert; the caller presents them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The signer declined the signature request.
    Rejected(String),
    /// The transaction was mined but reverted.
    Reverted(String),
    /// The RPC endpoint could not be reached or returned an error.
    Rpc(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Rejected(detail) => write!(f, "signature request rejected: {detail}"),
            FailureReason::Reverted(detail) => write!(f, "transaction reverted: {detail}"),
            FailureReason::Rpc(detail) => write!(f, "rpc error: {detail}"),
        }
    }
}

/// Lifecycle of one contract-call submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// No submission in progress.
    Idle,
    /// Signature requested from the signer.
    Submitting,
    /// Broadcast accepted; awaiting confirmation.
    Pending { tx_hash: B256 },
    /// Mined successfully.
    Confirmed { tx_hash: B256, block_number: u64 },
    /// Terminal failure; a new attempt starts over from [`SubmissionState::Idle`].
    Failed { reason: FailureReason },
}

impl SubmissionState {
    fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Pending { .. } => "pending",
            SubmissionState::Confirmed { .. } => "confirmed",
            SubmissionState::Failed { .. } => "failed",
        }
    }

    /// The transaction hash, once one has been assigned.
    pub fn tx_hash(&self) -> Option<B256> {
        match self {
            SubmissionState::Pending { tx_hash }
            | SubmissionState::Confirmed { tx_hash, .. } => Some(*tx_hash),
            _ => None,
        }
    }
}

/// A state transition that is not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} while {state}")]
pub struct TransitionError {
    pub action: &'static str,
    pub state: &'static str,
}

/// Drives one submission through its lifecycle.
///
/// At most one submission is in flight per flow instance: `begin` refuses
/// unless the flow is idle. Observers subscribe to the watch channel and
/// see every state change, including the hash as soon as broadcast
/// succeeds. There are no automatic retries; after a failure the caller
/// resets to idle and starts again.
pub struct SubmissionFlow {
    tx: watch::Sender<SubmissionState>,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SubmissionState::Idle);
        Self { tx }
    }

    /// The current state.
    pub fn state(&self) -> SubmissionState {
        self.tx.borrow().clone()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.tx.subscribe()
    }

    /// Request a signature; only legal from idle.
    pub fn begin(&self) -> Result<(), TransitionError> {
        self.transition("begin", |state| match state {
            SubmissionState::Idle => Some(SubmissionState::Submitting),
            _ => None,
        })
    }

    /// Record the assigned transaction hash once the broadcast is accepted.
    pub fn broadcast(&self, tx_hash: B256) -> Result<(), TransitionError> {
        self.transition("broadcast", |state| match state {
            SubmissionState::Submitting => Some(SubmissionState::Pending { tx_hash }),
            _ => None,
        })
    }

    /// Record confirmation of the pending transaction.
    pub fn confirm(&self, block_number: u64) -> Result<(), TransitionError> {
        self.transition("confirm", |state| match state {
            SubmissionState::Pending { tx_hash } => Some(SubmissionState::Confirmed {
                tx_hash: *tx_hash,
                block_number,
            }),
            _ => None,
        })
    }

    /// Record a failure while submitting or awaiting confirmation.
    pub fn fail(&self, reason: FailureReason) -> Result<(), TransitionError> {
        self.transition("fail", |state| match state {
            SubmissionState::Submitting | SubmissionState::Pending { .. } => {
                Some(SubmissionState::Failed { reason: reason.clone() })
            }
            _ => None,
        })
    }

    /// Return to idle after a terminal state so a new attempt can begin.
    pub fn reset(&self) -> Result<(), TransitionError> {
        self.transition("reset", |state| match state {
            SubmissionState::Idle
            | SubmissionState::Confirmed { .. }
            | SubmissionState::Failed { .. } => Some(SubmissionState::Idle),
            _ => None,
        })
    }

    fn transition(
        &self,
        action: &'static str,
        next: impl Fn(&SubmissionState) -> Option<SubmissionState>,
    ) -> Result<(), TransitionError> {
        let mut result = Ok(());
        self.tx.send_if_modified(|state| match next(state) {
            Some(new_state) => {
                *state = new_state;
                true
            }
            None => {
                result = Err(TransitionError {
                    action,
                    state: state.label(),
                });
                false
            }
        });
        result
    }
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}
