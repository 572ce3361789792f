// Path: crates/services/tests/common/mod.rs
#![allow(dead_code)]

use custody_api::state::InMemoryState;
use custody_api::transaction::context::TxContext;
use custody_services::tracking_ledger::params::{
    FinalizeBatchParams, LogBatchDepositParams, TransferCustodyParams,
};
use custody_services::{AllowListProofOracle, InMemoryRoleRegistry, TrackingLedger};
use custody_test_utils::fixtures::{ctx, oracle_principal, proof};
use custody_types::app::{AccountId, BatchId, Role};
use custody_types::error::LedgerError;
use std::sync::Arc;

/// The proof every harness oracle accepts.
pub const GOOD: u8 = 1;
/// A proof no harness oracle accepts.
pub const FORGED: u8 = 0xEE;

/// A ledger over an in-memory store with a live role registry and allow-list oracle.
pub struct Harness {
    pub ledger: TrackingLedger,
    pub roles: Arc<InMemoryRoleRegistry>,
    pub oracle: Arc<AllowListProofOracle>,
    pub state: InMemoryState,
    height: u64,
}

impl Harness {
    /// A ledger with no oracle configured.
    pub fn bare() -> Self {
        let roles = Arc::new(InMemoryRoleRegistry::new());
        let oracle = Arc::new(AllowListProofOracle::new());
        oracle.accept(oracle_principal(), proof(GOOD));
        Self {
            ledger: TrackingLedger::new(roles.clone(), oracle.clone()),
            roles,
            oracle,
            state: InMemoryState::new(),
            height: 0,
        }
    }

    /// A ledger whose oracle is configured and accepts [`GOOD`].
    pub fn new() -> Self {
        let mut h = Self::bare();
        let admin = h.next_ctx(AccountId([0xAD; 32]));
        h.ledger
            .set_oracle_contract(&mut h.state, &admin, oracle_principal())
            .expect("oracle configured");
        h
    }

    pub fn grant(&self, actor: AccountId, role: Role) {
        self.roles.assign(actor, role);
    }

    /// A call context one block after the previous one.
    pub fn next_ctx(&mut self, signer: AccountId) -> TxContext {
        self.height += 1;
        ctx(signer, self.height)
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn deposit_with(
        &mut self,
        actor: AccountId,
        params: LogBatchDepositParams,
    ) -> Result<(), LedgerError> {
        let ctx = self.next_ctx(actor);
        self.ledger.log_batch_deposit(&mut self.state, &ctx, &params)
    }

    pub fn deposit(&mut self, actor: AccountId, batch_id: BatchId) -> Result<(), LedgerError> {
        self.deposit_with(actor, deposit_params(batch_id, proof(GOOD).to_vec()))
    }

    pub fn transfer(
        &mut self,
        actor: AccountId,
        batch_id: BatchId,
        to: AccountId,
    ) -> Result<(), LedgerError> {
        self.transfer_with_proof(actor, batch_id, to, proof(GOOD).to_vec())
    }

    pub fn transfer_with_proof(
        &mut self,
        actor: AccountId,
        batch_id: BatchId,
        to: AccountId,
        proof: Vec<u8>,
    ) -> Result<(), LedgerError> {
        let ctx = self.next_ctx(actor);
        let params = TransferCustodyParams {
            batch_id,
            new_custodian: to,
            proof,
            notes: format!("handed to {}", to.short()),
        };
        self.ledger.transfer_custody(&mut self.state, &ctx, &params)
    }

    pub fn process(&mut self, actor: AccountId, batch_id: BatchId) -> Result<(), LedgerError> {
        let ctx = self.next_ctx(actor);
        self.ledger
            .mark_processed(&mut self.state, &ctx, &finalize_params(batch_id, "processed"))
    }

    pub fn reject(&mut self, actor: AccountId, batch_id: BatchId) -> Result<(), LedgerError> {
        let ctx = self.next_ctx(actor);
        self.ledger
            .reject_batch(&mut self.state, &ctx, &finalize_params(batch_id, "rejected"))
    }

    pub fn count(&self, batch_id: BatchId) -> u32 {
        self.ledger
            .get_batch_history_count(&self.state, batch_id)
            .expect("count readable")
    }
}

pub fn deposit_params(batch_id: BatchId, proof: Vec<u8>) -> LogBatchDepositParams {
    LogBatchDepositParams {
        batch_id,
        material_type: "plastic".into(),
        weight: 100,
        deposit_location: "LocationX".into(),
        proof,
    }
}

pub fn finalize_params(batch_id: BatchId, notes: &str) -> FinalizeBatchParams {
    FinalizeBatchParams {
        batch_id,
        proof: proof(GOOD).to_vec(),
        notes: notes.into(),
    }
}
