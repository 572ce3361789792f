// Path: crates/types/src/app/batch.rs

//! Records stored by the tracking ledger: the per-batch lifecycle status and
//! the entries of its append-only audit history.

use crate::app::AccountId;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Identifier of a tracked material batch. Valid identifiers are strictly positive.
pub type BatchId = u64;

/// Size in bytes of every proof blob accepted by the ledger.
pub const PROOF_LEN: usize = 32;

/// A proof blob as submitted by the caller and recorded in the history.
pub type ProofHash = [u8; PROOF_LEN];

/// Maximum length, in characters, of a batch's material type descriptor.
pub const MAX_MATERIAL_TYPE_LEN: usize = 50;

/// Maximum length, in characters, of a batch's deposit location descriptor.
pub const MAX_LOCATION_LEN: usize = 100;

/// The note recorded on every deposit history entry.
pub const DEPOSIT_NOTE: &str = "Initial deposit";

/// The history ceiling used when no configuration overrides it.
pub const DEFAULT_MAX_HISTORY_PER_BATCH: u32 = 50;

/// The lifecycle stage of a batch.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleStatus {
    /// Deposited by a consumer and held by them.
    Deposited,
    /// Handed on to a new custodian at least once.
    InTransit,
    /// Finalized by a processor. Absorbing.
    Processed,
    /// Refused by a processor. Absorbing.
    Rejected,
}

impl LifecycleStatus {
    /// Returns true for the absorbing states, from which no transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed | Self::Rejected)
    }
}

/// The current state of a single batch. One exists per successfully deposited batch.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BatchStatus {
    /// The lifecycle stage.
    pub current_status: LifecycleStatus,
    /// Block height of the most recent mutation.
    pub last_update_timestamp: u64,
    /// The principal currently holding custody. Only it may move the batch on.
    pub current_custodian: AccountId,
    /// Free-form material descriptor.
    pub material_type: String,
    /// Strictly positive quantity.
    pub weight: u64,
    /// Where the batch was deposited. Fixed at deposit time.
    pub deposit_location: String,
}

/// The action recorded by a history entry.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryAction {
    /// The batch was deposited.
    Deposit,
    /// Custody moved to a new principal.
    CustodyTransfer,
    /// The batch was marked processed.
    Processed,
    /// The batch was rejected.
    Rejected,
}

impl HistoryAction {
    /// The canonical action name, as it appears in audit output and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::CustodyTransfer => "custody-transfer",
            Self::Processed => "processed",
            Self::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry of a batch's audit history.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    /// What happened.
    pub action: HistoryAction,
    /// Who did it.
    pub actor: AccountId,
    /// Block height at which it happened.
    pub timestamp: u64,
    /// The exact proof blob supplied with the call.
    #[serde(with = "crate::app::hex32")]
    pub proof_hash: ProofHash,
    /// Caller annotation, or the fixed deposit note.
    pub notes: String,
}
