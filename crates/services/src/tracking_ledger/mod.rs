// Path: crates/services/src/tracking_ledger/mod.rs
//! The tracking ledger: custody and lifecycle state of material batches.
//!
//! Every mutating call runs its checks and writes against a [`StateOverlay`]
//! and reaches the store through a single `batch_apply`, so a refused call
//! leaves no trace. Checks run in a fixed order and the first failure is the
//! one reported.
//!
//! [`StateOverlay`]: custody_api::state::StateOverlay

mod admin;
mod gate;
mod history;
pub mod params;
mod registry;
mod service;

use custody_api::identity::RoleResolver;
use custody_api::oracle::ProofOracle;
use custody_api::state::{commit_staged, StateAccess};
use custody_api::transaction::context::TxContext;
use custody_telemetry::{error_metrics, ledger_metrics};
use custody_types::app::{
    AccountId, BatchId, BatchStatus, HistoryAction, HistoryEntry, LifecycleStatus, Role,
    DEPOSIT_NOTE,
};
use custody_types::codec;
use custody_types::config::LedgerConfig;
use custody_types::error::{ErrorCode, LedgerError, StateError};
use gate::Gate;
use parity_scale_codec::{Decode, Encode};
use params::{FinalizeBatchParams, LogBatchDepositParams, TransferCustodyParams};
use std::sync::Arc;

pub(crate) fn load<T: Decode>(state: &dyn StateAccess, key: &[u8]) -> Result<Option<T>, LedgerError> {
    match state.get(key)? {
        Some(bytes) => codec::from_bytes_canonical(&bytes)
            .map(Some)
            .map_err(|e| StateError::Decode(e).into()),
        None => Ok(None),
    }
}

pub(crate) fn store<T: Encode>(
    state: &mut dyn StateAccess,
    key: &[u8],
    value: &T,
) -> Result<(), LedgerError> {
    let bytes = codec::to_bytes_canonical(value).map_err(LedgerError::Serialization)?;
    state.insert(key, &bytes)?;
    Ok(())
}

/// The ledger controller. It owns no state of its own; the store is passed in
/// on every call and the two collaborators are only ever queried.
#[derive(Clone)]
pub struct TrackingLedger {
    roles: Arc<dyn RoleResolver>,
    oracle: Arc<dyn ProofOracle>,
}

impl std::fmt::Debug for TrackingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingLedger").finish_non_exhaustive()
    }
}

impl TrackingLedger {
    pub fn new(roles: Arc<dyn RoleResolver>, oracle: Arc<dyn ProofOracle>) -> Self {
        Self { roles, oracle }
    }

    fn gate(&self) -> Gate<'_> {
        Gate::new(&*self.roles, &*self.oracle)
    }

    /// Seeds the configuration scalars into an empty store.
    pub fn initialize(
        &self,
        state: &mut dyn StateAccess,
        config: &LedgerConfig,
    ) -> Result<(), LedgerError> {
        config
            .validate()
            .map_err(|e| LedgerError::InvalidInput(e.to_string()))?;
        commit_staged(state, |overlay| admin::seed(overlay, config))?;
        tracing::info!(
            target: "tracking_ledger",
            max_history_per_batch = config.max_history_per_batch,
            oracle = ?config.oracle.map(|o| o.short()),
            "ledger initialized"
        );
        Ok(())
    }

    // --- Transitions ---

    /// Records a new batch, held by the depositing consumer.
    pub fn log_batch_deposit(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        p: &LogBatchDepositParams,
    ) -> Result<(), LedgerError> {
        let actor = ctx.signer_account_id;
        let outcome = commit_staged(state, |overlay| {
            let gate = self.gate();
            gate.require_role(&actor, Role::Consumer)?;
            registry::validate_deposit_fields(
                p.batch_id,
                &p.material_type,
                p.weight,
                &p.deposit_location,
            )?;
            let proof_hash = gate.verify_proof(overlay, &p.proof)?;
            if registry::load_status(overlay, p.batch_id)?.is_some() {
                return Err(LedgerError::AlreadyExists(p.batch_id));
            }
            let status = BatchStatus {
                current_status: LifecycleStatus::Deposited,
                last_update_timestamp: ctx.block_height,
                current_custodian: actor,
                material_type: p.material_type.clone(),
                weight: p.weight,
                deposit_location: p.deposit_location.clone(),
            };
            let entry = HistoryEntry {
                action: HistoryAction::Deposit,
                actor,
                timestamp: ctx.block_height,
                proof_hash,
                notes: DEPOSIT_NOTE.to_string(),
            };
            commit_transition(overlay, p.batch_id, &status, &entry)
        });
        record("log_batch_deposit", HistoryAction::Deposit, p.batch_id, ctx, outcome)
    }

    /// Hands a batch from its current custodian to `new_custodian`.
    pub fn transfer_custody(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        p: &TransferCustodyParams,
    ) -> Result<(), LedgerError> {
        let actor = ctx.signer_account_id;
        let outcome = commit_staged(state, |overlay| {
            let gate = self.gate();
            let current = registry::require_status(overlay, p.batch_id)?;
            gate.require_role(&actor, Role::Collector)?;
            if p.new_custodian.is_placeholder() {
                return Err(LedgerError::InvalidInput(
                    "new custodian must not be the placeholder principal".into(),
                ));
            }
            let proof_hash = gate.verify_proof(overlay, &p.proof)?;
            gate::require_custodian(&current, &actor)?;
            registry::require_open(p.batch_id, &current)?;
            registry::require_not_before(p.batch_id, &current, ctx.block_height)?;
            let status = BatchStatus {
                current_status: LifecycleStatus::InTransit,
                last_update_timestamp: ctx.block_height,
                current_custodian: p.new_custodian,
                ..current
            };
            let entry = HistoryEntry {
                action: HistoryAction::CustodyTransfer,
                actor,
                timestamp: ctx.block_height,
                proof_hash,
                notes: p.notes.clone(),
            };
            commit_transition(overlay, p.batch_id, &status, &entry)
        });
        record(
            "transfer_custody",
            HistoryAction::CustodyTransfer,
            p.batch_id,
            ctx,
            outcome,
        )
    }

    /// Finalizes a batch as processed. Processed is absorbing.
    pub fn mark_processed(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        p: &FinalizeBatchParams,
    ) -> Result<(), LedgerError> {
        let outcome = self.finalize(
            state,
            ctx,
            p,
            LifecycleStatus::Processed,
            HistoryAction::Processed,
        );
        record("mark_processed", HistoryAction::Processed, p.batch_id, ctx, outcome)
    }

    /// Finalizes a batch as rejected. Rejected is absorbing.
    pub fn reject_batch(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        p: &FinalizeBatchParams,
    ) -> Result<(), LedgerError> {
        let outcome = self.finalize(
            state,
            ctx,
            p,
            LifecycleStatus::Rejected,
            HistoryAction::Rejected,
        );
        record("reject_batch", HistoryAction::Rejected, p.batch_id, ctx, outcome)
    }

    fn finalize(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        p: &FinalizeBatchParams,
        target: LifecycleStatus,
        action: HistoryAction,
    ) -> Result<(), LedgerError> {
        let actor = ctx.signer_account_id;
        commit_staged(state, |overlay| {
            let gate = self.gate();
            let current = registry::require_status(overlay, p.batch_id)?;
            gate.require_role(&actor, Role::Processor)?;
            let proof_hash = gate.verify_proof(overlay, &p.proof)?;
            gate::require_custodian(&current, &actor)?;
            registry::require_open(p.batch_id, &current)?;
            registry::require_not_before(p.batch_id, &current, ctx.block_height)?;
            let status = BatchStatus {
                current_status: target,
                last_update_timestamp: ctx.block_height,
                ..current
            };
            let entry = HistoryEntry {
                action,
                actor,
                timestamp: ctx.block_height,
                proof_hash,
                notes: p.notes.clone(),
            };
            commit_transition(overlay, p.batch_id, &status, &entry)
        })
    }

    // --- Configuration ---

    pub fn set_oracle_contract(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        oracle: AccountId,
    ) -> Result<(), LedgerError> {
        let outcome = commit_staged(state, |overlay| admin::set_oracle_contract(overlay, oracle));
        record_config("set_oracle_contract", "oracle", ctx, outcome)
    }

    pub fn set_max_history_per_batch(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        max_history_per_batch: u32,
    ) -> Result<(), LedgerError> {
        let outcome = commit_staged(state, |overlay| {
            admin::set_max_history_per_batch(overlay, max_history_per_batch)
        });
        record_config(
            "set_max_history_per_batch",
            "max_history_per_batch",
            ctx,
            outcome,
        )
    }

    // --- Queries ---

    /// The batch's current status, or `None` if it was never deposited.
    pub fn get_batch_status(
        &self,
        state: &dyn StateAccess,
        batch_id: BatchId,
    ) -> Result<Option<BatchStatus>, LedgerError> {
        registry::load_status(state, batch_id)
    }

    /// The history entry at `index`, or `None` if there is none.
    pub fn get_batch_history_entry(
        &self,
        state: &dyn StateAccess,
        batch_id: BatchId,
        index: u32,
    ) -> Result<Option<HistoryEntry>, LedgerError> {
        history::lookup(state, batch_id, index)
    }

    /// Number of history entries; 0 for a batch that was never deposited.
    pub fn get_batch_history_count(
        &self,
        state: &dyn StateAccess,
        batch_id: BatchId,
    ) -> Result<u32, LedgerError> {
        history::count(state, batch_id)
    }

    /// The batch's whole history in index order.
    pub fn get_batch_history(
        &self,
        state: &dyn StateAccess,
        batch_id: BatchId,
    ) -> Result<Vec<HistoryEntry>, LedgerError> {
        history::entries(state, batch_id)
    }

    pub fn get_oracle_contract(
        &self,
        state: &dyn StateAccess,
    ) -> Result<Option<AccountId>, LedgerError> {
        admin::oracle_contract(state)
    }

    pub fn get_max_history_per_batch(&self, state: &dyn StateAccess) -> Result<u32, LedgerError> {
        admin::max_history_per_batch(state)
    }

    pub fn get_user_registry(&self, state: &dyn StateAccess) -> Result<AccountId, LedgerError> {
        admin::user_registry(state)
    }

    pub fn get_batch_registry(&self, state: &dyn StateAccess) -> Result<AccountId, LedgerError> {
        admin::batch_registry(state)
    }
}

// Capacity is checked before the status write so a full log leaves the status as it was.
fn commit_transition(
    state: &mut dyn StateAccess,
    batch_id: BatchId,
    status: &BatchStatus,
    entry: &HistoryEntry,
) -> Result<(), LedgerError> {
    let ceiling = admin::max_history_per_batch(state)?;
    history::ensure_capacity(state, batch_id, ceiling)?;
    registry::store_status(state, batch_id, status)?;
    history::append(state, batch_id, ceiling, entry)?;
    Ok(())
}

fn record(
    operation: &'static str,
    action: HistoryAction,
    batch_id: BatchId,
    ctx: &TxContext,
    outcome: Result<(), LedgerError>,
) -> Result<(), LedgerError> {
    match &outcome {
        Ok(()) => {
            tracing::info!(
                target: "tracking_ledger",
                batch_id,
                actor = %ctx.signer_account_id.short(),
                action = action.as_str(),
                height = ctx.block_height,
                "batch transition committed"
            );
            ledger_metrics().inc_transition(action.as_str());
        }
        Err(e) => refused(operation, Some(batch_id), ctx, e),
    }
    outcome
}

fn record_config(
    operation: &'static str,
    setting: &'static str,
    ctx: &TxContext,
    outcome: Result<(), LedgerError>,
) -> Result<(), LedgerError> {
    match &outcome {
        Ok(()) => {
            tracing::info!(
                target: "tracking_ledger",
                setting,
                actor = %ctx.signer_account_id.short(),
                "configuration updated"
            );
            ledger_metrics().inc_config_change(setting);
        }
        Err(e) => refused(operation, None, ctx, e),
    }
    outcome
}

fn refused(operation: &'static str, batch_id: Option<BatchId>, ctx: &TxContext, e: &LedgerError) {
    tracing::warn!(
        target: "tracking_ledger",
        operation,
        batch_id,
        actor = %ctx.signer_account_id.short(),
        code = e.code(),
        error = %e,
        "call refused"
    );
    ledger_metrics().inc_refused_call(operation, e.code());
    error_metrics().inc_error("ledger", e.code());
}
