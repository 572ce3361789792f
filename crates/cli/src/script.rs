// Path: crates/cli/src/script.rs
//! The JSON script format read by `custody replay`.
//!
//! ```json
//! { "steps": [
//!   { "op": "grant_role", "actor": "0x11..11", "role": "consumer" },
//!   { "op": "accept_proof", "proof": "0101..01" },
//!   { "op": "log_batch_deposit", "signer": "0x11..11", "batch_id": 1,
//!     "material_type": "plastic", "weight": 100,
//!     "deposit_location": "LocationX", "proof": "0101..01" }
//! ] }
//! ```
//!
//! Principals and proofs are hex strings, optionally `0x`-prefixed.

use anyhow::{Context, Result};
use custody_types::app::{AccountId, BatchId, ProofHash, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An ordered list of steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// One scripted action: either a ledger call or a change to a collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Assigns a role in the user registry.
    GrantRole { actor: AccountId, role: Role },
    /// Removes a principal from the user registry.
    RevokeRole { actor: AccountId },
    /// Allow-lists a proof. Without `oracle`, the ledger's configured oracle is used.
    AcceptProof {
        #[serde(default)]
        oracle: Option<AccountId>,
        #[serde(with = "custody_types::app::hex32")]
        proof: ProofHash,
    },
    SetOracleContract {
        signer: AccountId,
        oracle: AccountId,
    },
    SetMaxHistoryPerBatch {
        signer: AccountId,
        max: u32,
    },
    LogBatchDeposit {
        signer: AccountId,
        batch_id: BatchId,
        material_type: String,
        weight: u64,
        deposit_location: String,
        #[serde(with = "hex_bytes")]
        proof: Vec<u8>,
    },
    TransferCustody {
        signer: AccountId,
        batch_id: BatchId,
        new_custodian: AccountId,
        #[serde(with = "hex_bytes")]
        proof: Vec<u8>,
        #[serde(default)]
        notes: String,
    },
    MarkProcessed {
        signer: AccountId,
        batch_id: BatchId,
        #[serde(with = "hex_bytes")]
        proof: Vec<u8>,
        #[serde(default)]
        notes: String,
    },
    RejectBatch {
        signer: AccountId,
        batch_id: BatchId,
        #[serde(with = "hex_bytes")]
        proof: Vec<u8>,
        #[serde(default)]
        notes: String,
    },
}

impl Step {
    /// The `op` tag, as written in the script.
    pub fn op(&self) -> &'static str {
        match self {
            Self::GrantRole { .. } => "grant_role",
            Self::RevokeRole { .. } => "revoke_role",
            Self::AcceptProof { .. } => "accept_proof",
            Self::SetOracleContract { .. } => "set_oracle_contract",
            Self::SetMaxHistoryPerBatch { .. } => "set_max_history_per_batch",
            Self::LogBatchDeposit { .. } => "log_batch_deposit",
            Self::TransferCustody { .. } => "transfer_custody",
            Self::MarkProcessed { .. } => "mark_processed",
            Self::RejectBatch { .. } => "reject_batch",
        }
    }

    /// The batch a ledger call targets, if any.
    pub fn batch_id(&self) -> Option<BatchId> {
        match self {
            Self::LogBatchDeposit { batch_id, .. }
            | Self::TransferCustody { batch_id, .. }
            | Self::MarkProcessed { batch_id, .. }
            | Self::RejectBatch { batch_id, .. } => Some(*batch_id),
            _ => None,
        }
    }
}

/// Variable-length byte strings as hex. Proofs of the wrong size must reach the
/// ledger intact so it can refuse them.
mod hex_bytes {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let a = "11".repeat(32);
        let p = "01".repeat(32);
        let text = format!(
            r#"{{ "steps": [
                {{ "op": "grant_role", "actor": "0x{a}", "role": "collector" }},
                {{ "op": "revoke_role", "actor": "{a}" }},
                {{ "op": "accept_proof", "proof": "{p}" }},
                {{ "op": "set_oracle_contract", "signer": "{a}", "oracle": "{a}" }},
                {{ "op": "set_max_history_per_batch", "signer": "{a}", "max": 3 }},
                {{ "op": "log_batch_deposit", "signer": "{a}", "batch_id": 1,
                   "material_type": "plastic", "weight": 100,
                   "deposit_location": "LocationX", "proof": "{p}" }},
                {{ "op": "transfer_custody", "signer": "{a}", "batch_id": 1,
                   "new_custodian": "{a}", "proof": "0x{p}", "notes": "hop" }},
                {{ "op": "mark_processed", "signer": "{a}", "batch_id": 1, "proof": "{p}" }},
                {{ "op": "reject_batch", "signer": "{a}", "batch_id": 1, "proof": "ab" }}
            ] }}"#
        );
        let script = Script::from_json_str(&text).unwrap();
        let ops: Vec<_> = script.steps.iter().map(Step::op).collect();
        assert_eq!(
            ops,
            vec![
                "grant_role",
                "revoke_role",
                "accept_proof",
                "set_oracle_contract",
                "set_max_history_per_batch",
                "log_batch_deposit",
                "transfer_custody",
                "mark_processed",
                "reject_batch"
            ]
        );
        assert_eq!(
            script.steps[0],
            Step::GrantRole {
                actor: AccountId([0x11; 32]),
                role: Role::Collector
            }
        );
        match &script.steps[8] {
            Step::RejectBatch { proof, notes, .. } => {
                assert_eq!(proof, &vec![0xab]);
                assert!(notes.is_empty());
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(script.steps[5].batch_id(), Some(1));
        assert_eq!(script.steps[0].batch_id(), None);
    }

    #[test]
    fn rejects_unknown_ops_and_bad_hex() {
        assert!(Script::from_json_str(r#"{ "steps": [ { "op": "burn" } ] }"#).is_err());
        let text = r#"{ "steps": [ { "op": "revoke_role", "actor": "zz" } ] }"#;
        assert!(Script::from_json_str(text).is_err());
    }
}
