// Path: crates/api/src/transaction/context.rs
//! Defines the stable context for call execution.

use custody_types::app::AccountId;

/// Provides stable, read-only context to the ledger during a single call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxContext {
    /// The current block height. This is the ledger's logical clock.
    pub block_height: u64,
    /// The `AccountId` of the entity that submitted the call.
    /// This is the authoritative source for role and custody checks.
    pub signer_account_id: AccountId,
}

impl TxContext {
    /// Creates a context for a call made by `signer` at `block_height`.
    pub fn new(signer: AccountId, block_height: u64) -> Self {
        Self {
            block_height,
            signer_account_id: signer,
        }
    }
}
