// Path: crates/services/src/tracking_ledger/params.rs
//! SCALE-encoded parameters for the tracking ledger's methods.

use custody_types::app::{AccountId, BatchId};
use parity_scale_codec::{Decode, Encode};

/// Parameters for `log_batch_deposit@v1`.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct LogBatchDepositParams {
    pub batch_id: BatchId,
    pub material_type: String,
    pub weight: u64,
    pub deposit_location: String,
    /// Must be exactly 32 bytes; any other length is refused, not truncated.
    pub proof: Vec<u8>,
}

/// Parameters for `transfer_custody@v1`.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct TransferCustodyParams {
    pub batch_id: BatchId,
    pub new_custodian: AccountId,
    pub proof: Vec<u8>,
    pub notes: String,
}

/// Parameters for `mark_processed@v1` and `reject_batch@v1`.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct FinalizeBatchParams {
    pub batch_id: BatchId,
    pub proof: Vec<u8>,
    pub notes: String,
}

/// Parameters for `set_oracle_contract@v1`.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOracleContractParams {
    pub oracle: AccountId,
}

/// Parameters for `set_max_history_per_batch@v1`.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetMaxHistoryParams {
    pub max_history_per_batch: u32,
}

/// Parameters for the per-batch queries.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchQueryParams {
    pub batch_id: BatchId,
}

/// Parameters for `get_batch_history_entry@v1`.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntryQueryParams {
    pub batch_id: BatchId,
    pub index: u32,
}
