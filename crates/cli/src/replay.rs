// Path: crates/cli/src/replay.rs
//! Drives an in-memory tracking ledger through a [`Script`].

use crate::script::{Script, Step};
use anyhow::{anyhow, Context, Result};
use custody_api::services::LedgerService;
use custody_api::state::InMemoryState;
use custody_api::transaction::context::TxContext;
use custody_services::tracking_ledger::params::{
    FinalizeBatchParams, LogBatchDepositParams, SetMaxHistoryParams, SetOracleContractParams,
    TransferCustodyParams,
};
use custody_services::{AllowListProofOracle, InMemoryRoleRegistry, TrackingLedger};
use custody_types::app::{AccountId, BatchId, BatchStatus, HistoryEntry};
use custody_types::config::LedgerConfig;
use custody_types::error::ErrorCode;
use parity_scale_codec::Encode;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// What happened to one step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    /// Block height of the call; absent for collaborator steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final state of a batch referenced by the script.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub batch_id: BatchId,
    /// `None` if the batch was never successfully deposited.
    pub status: Option<BatchStatus>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: Vec<StepOutcome>,
    pub batches: Vec<BatchReport>,
    pub oracle: Option<AccountId>,
    pub max_history_per_batch: u32,
    pub user_registry: AccountId,
    pub batch_registry: AccountId,
}

impl ReplayReport {
    /// Number of ledger calls that were refused.
    pub fn refused(&self) -> usize {
        self.steps.iter().filter(|s| !s.ok).count()
    }
}

/// A ledger, its collaborators and its store, advanced one block per ledger call.
pub struct Replayer {
    ledger: TrackingLedger,
    roles: Arc<InMemoryRoleRegistry>,
    oracle: Arc<AllowListProofOracle>,
    state: InMemoryState,
    height: u64,
    touched: BTreeSet<BatchId>,
}

impl Replayer {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let roles = Arc::new(InMemoryRoleRegistry::new());
        let oracle = Arc::new(AllowListProofOracle::new());
        let ledger = TrackingLedger::new(roles.clone(), oracle.clone());
        let mut state = InMemoryState::new();
        ledger
            .initialize(&mut state, config)
            .context("failed to initialize ledger")?;
        Ok(Self {
            ledger,
            roles,
            oracle,
            state,
            height: 0,
            touched: BTreeSet::new(),
        })
    }

    pub fn apply(&mut self, index: usize, step: &Step) -> Result<StepOutcome> {
        let outcome = |height, ok, code, error| StepOutcome {
            index,
            op: step.op(),
            height,
            ok,
            code,
            error,
        };
        let (method, signer, params) = match step {
            Step::GrantRole { actor, role } => {
                self.roles.assign(*actor, *role);
                return Ok(outcome(None, true, None, None));
            }
            Step::RevokeRole { actor } => {
                self.roles.revoke(actor);
                return Ok(outcome(None, true, None, None));
            }
            Step::AcceptProof { oracle, proof } => {
                let principal = match oracle {
                    Some(o) => *o,
                    None => self
                        .ledger
                        .get_oracle_contract(&self.state)?
                        .ok_or_else(|| {
                            anyhow!("step {}: accept_proof needs an oracle, none is configured", index)
                        })?,
                };
                self.oracle.accept(principal, *proof);
                return Ok(outcome(None, true, None, None));
            }
            Step::SetOracleContract { signer, oracle } => (
                "set_oracle_contract@v1",
                signer,
                SetOracleContractParams { oracle: *oracle }.encode(),
            ),
            Step::SetMaxHistoryPerBatch { signer, max } => (
                "set_max_history_per_batch@v1",
                signer,
                SetMaxHistoryParams {
                    max_history_per_batch: *max,
                }
                .encode(),
            ),
            Step::LogBatchDeposit {
                signer,
                batch_id,
                material_type,
                weight,
                deposit_location,
                proof,
            } => (
                "log_batch_deposit@v1",
                signer,
                LogBatchDepositParams {
                    batch_id: *batch_id,
                    material_type: material_type.clone(),
                    weight: *weight,
                    deposit_location: deposit_location.clone(),
                    proof: proof.clone(),
                }
                .encode(),
            ),
            Step::TransferCustody {
                signer,
                batch_id,
                new_custodian,
                proof,
                notes,
            } => (
                "transfer_custody@v1",
                signer,
                TransferCustodyParams {
                    batch_id: *batch_id,
                    new_custodian: *new_custodian,
                    proof: proof.clone(),
                    notes: notes.clone(),
                }
                .encode(),
            ),
            Step::MarkProcessed {
                signer,
                batch_id,
                proof,
                notes,
            } => (
                "mark_processed@v1",
                signer,
                finalize(*batch_id, proof, notes),
            ),
            Step::RejectBatch {
                signer,
                batch_id,
                proof,
                notes,
            } => ("reject_batch@v1", signer, finalize(*batch_id, proof, notes)),
        };

        if let Some(batch_id) = step.batch_id() {
            self.touched.insert(batch_id);
        }
        self.height += 1;
        let ctx = TxContext::new(*signer, self.height);
        let result = self
            .ledger
            .handle_service_call(&mut self.state, method, &params, &ctx);
        Ok(match result {
            Ok(_) => outcome(Some(self.height), true, None, None),
            Err(e) => outcome(Some(self.height), false, Some(e.code()), Some(e.to_string())),
        })
    }

    pub fn report(&self, steps: Vec<StepOutcome>) -> Result<ReplayReport> {
        let batches = self
            .touched
            .iter()
            .map(|&batch_id| {
                Ok(BatchReport {
                    batch_id,
                    status: self.ledger.get_batch_status(&self.state, batch_id)?,
                    history: self.ledger.get_batch_history(&self.state, batch_id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReplayReport {
            steps,
            batches,
            oracle: self.ledger.get_oracle_contract(&self.state)?,
            max_history_per_batch: self.ledger.get_max_history_per_batch(&self.state)?,
            user_registry: self.ledger.get_user_registry(&self.state)?,
            batch_registry: self.ledger.get_batch_registry(&self.state)?,
        })
    }
}

fn finalize(batch_id: BatchId, proof: &[u8], notes: &str) -> Vec<u8> {
    FinalizeBatchParams {
        batch_id,
        proof: proof.to_vec(),
        notes: notes.to_string(),
    }
    .encode()
}

/// Runs every step of `script` against a fresh ledger built from `config`.
pub fn replay(config: &LedgerConfig, script: &Script) -> Result<ReplayReport> {
    let mut replayer = Replayer::new(config)?;
    let mut outcomes = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let outcome = replayer.apply(index, step)?;
        if !outcome.ok {
            tracing::debug!(
                index,
                op = outcome.op,
                code = outcome.code.unwrap_or_default(),
                "step refused"
            );
        }
        outcomes.push(outcome);
    }
    replayer.report(outcomes)
}

/// [`replay`] with the configuration and script read from disk. A missing
/// config path means the default configuration.
pub fn replay_files(config: Option<&Path>, script: &Path) -> Result<ReplayReport> {
    let config = match config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("invalid configuration {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    let script = Script::load(script)?;
    replay(&config, &script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_types::app::{LifecycleStatus, Role};

    fn who(tag: u8) -> AccountId {
        AccountId([tag; 32])
    }

    fn deposit(signer: AccountId, batch_id: BatchId, proof: Vec<u8>) -> Step {
        Step::LogBatchDeposit {
            signer,
            batch_id,
            material_type: "plastic".into(),
            weight: 100,
            deposit_location: "LocationX".into(),
            proof,
        }
    }

    #[test]
    fn replays_a_deposit_and_reports_the_batch() {
        let config = LedgerConfig {
            oracle: Some(who(0xA0)),
            ..LedgerConfig::default()
        };
        let script = Script {
            steps: vec![
                Step::GrantRole {
                    actor: who(1),
                    role: Role::Consumer,
                },
                Step::AcceptProof {
                    oracle: None,
                    proof: [7; 32],
                },
                deposit(who(1), 1, vec![7; 32]),
                deposit(who(1), 1, vec![7; 32]),
            ],
        };
        let report = replay(&config, &script).unwrap();
        assert_eq!(report.steps.len(), 4);
        assert!(report.steps[2].ok);
        assert_eq!(report.steps[2].height, Some(1));
        assert_eq!(report.steps[3].code, Some("LEDGER_ALREADY_EXISTS"));
        assert_eq!(report.refused(), 1);

        assert_eq!(report.batches.len(), 1);
        let batch = &report.batches[0];
        assert_eq!(
            batch.status.as_ref().unwrap().current_status,
            LifecycleStatus::Deposited
        );
        assert_eq!(batch.history.len(), 1);
        assert_eq!(report.oracle, Some(who(0xA0)));
    }

    #[test]
    fn accept_proof_without_an_oracle_is_a_script_error() {
        let script = Script {
            steps: vec![Step::AcceptProof {
                oracle: None,
                proof: [7; 32],
            }],
        };
        assert!(replay(&LedgerConfig::default(), &script).is_err());
    }

    #[test]
    fn refused_deposits_still_appear_in_the_report() {
        let script = Script {
            steps: vec![
                Step::GrantRole {
                    actor: who(1),
                    role: Role::Consumer,
                },
                deposit(who(1), 4, vec![7; 32]),
            ],
        };
        let report = replay(&LedgerConfig::default(), &script).unwrap();
        assert_eq!(report.steps[1].code, Some("LEDGER_NOT_VERIFIED"));
        assert_eq!(report.batches[0].batch_id, 4);
        assert!(report.batches[0].status.is_none());
        assert!(report.batches[0].history.is_empty());
    }
}
