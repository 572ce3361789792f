// Path: crates/types/src/keys/mod.rs
//! Defines constants for the state keys owned by the tracking ledger.
//!
//! Batch identifiers and history indices are encoded big-endian so that a
//! prefix scan over a batch's history yields entries in index order.

use crate::app::BatchId;

/// The state key prefix for batch status records, keyed by batch id.
pub const BATCH_STATUS_PREFIX: &[u8] = b"ledger::batch::";
/// The state key prefix for history entries, keyed by batch id and index.
pub const BATCH_HISTORY_PREFIX: &[u8] = b"ledger::history::";
/// The state key prefix for per-batch history counters.
pub const BATCH_HISTORY_COUNT_PREFIX: &[u8] = b"ledger::history_count::";

/// The state key for the write-once proof oracle principal.
pub const ORACLE_CONTRACT_KEY: &[u8] = b"ledger::config::oracle";
/// The state key for the per-batch history ceiling.
pub const MAX_HISTORY_PER_BATCH_KEY: &[u8] = b"ledger::config::max_history_per_batch";
/// The state key for the user registry reference.
pub const USER_REGISTRY_KEY: &[u8] = b"ledger::config::user_registry";
/// The state key for the batch registry reference.
pub const BATCH_REGISTRY_KEY: &[u8] = b"ledger::config::batch_registry";

/// Key of the status record for `batch_id`.
pub fn batch_status_key(batch_id: BatchId) -> Vec<u8> {
    [BATCH_STATUS_PREFIX, &batch_id.to_be_bytes()].concat()
}

/// Prefix shared by every history entry of `batch_id`.
pub fn batch_history_prefix(batch_id: BatchId) -> Vec<u8> {
    [BATCH_HISTORY_PREFIX, &batch_id.to_be_bytes(), b"::"].concat()
}

/// Key of history entry `index` of `batch_id`.
pub fn batch_history_key(batch_id: BatchId, index: u32) -> Vec<u8> {
    [batch_history_prefix(batch_id).as_slice(), &index.to_be_bytes()].concat()
}

/// Key of the history counter for `batch_id`.
pub fn batch_history_count_key(batch_id: BatchId) -> Vec<u8> {
    [BATCH_HISTORY_COUNT_PREFIX, &batch_id.to_be_bytes()].concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keys_sort_by_index() {
        let a = batch_history_key(1, 2);
        let b = batch_history_key(1, 10);
        assert!(a < b);
        assert!(a.starts_with(&batch_history_prefix(1)));
        assert!(!a.starts_with(&batch_history_prefix(2)));
    }

    #[test]
    fn status_keys_are_distinct_per_batch() {
        assert_ne!(batch_status_key(1), batch_status_key(256));
        assert_ne!(batch_status_key(1), batch_history_count_key(1));
    }
}
