// Path: crates/services/src/tracking_ledger/history.rs
//! The per-batch, capacity-bounded, append-only audit log.
//!
//! Entries live at `(batch_id, index)` for `index` in `0..count`; the counter is
//! stored separately. Nothing here overwrites, reorders or deletes an entry.

use super::{load, store};
use custody_api::state::StateAccess;
use custody_types::app::{BatchId, HistoryEntry};
use custody_types::codec;
use custody_types::error::{LedgerError, StateError};
use custody_types::keys::{batch_history_count_key, batch_history_key, batch_history_prefix};

pub(crate) fn count(state: &dyn StateAccess, batch_id: BatchId) -> Result<u32, LedgerError> {
    Ok(load(state, &batch_history_count_key(batch_id))?.unwrap_or(0))
}

/// Returns the index the next entry would take, or fails if the log is full.
pub(crate) fn ensure_capacity(
    state: &dyn StateAccess,
    batch_id: BatchId,
    ceiling: u32,
) -> Result<u32, LedgerError> {
    let count = count(state, batch_id)?;
    if count >= ceiling {
        return Err(LedgerError::CapacityExceeded {
            batch_id,
            count,
            ceiling,
        });
    }
    Ok(count)
}

/// Writes `entry` at the next free index and bumps the counter. Returns the index.
pub(crate) fn append(
    state: &mut dyn StateAccess,
    batch_id: BatchId,
    ceiling: u32,
    entry: &HistoryEntry,
) -> Result<u32, LedgerError> {
    let index = ensure_capacity(state, batch_id, ceiling)?;
    let key = batch_history_key(batch_id, index);
    if state.get(&key)?.is_some() {
        return Err(StateError::InvalidValue(format!(
            "history slot {} of batch {} is already occupied",
            index, batch_id
        ))
        .into());
    }
    store(state, &key, entry)?;
    store(state, &batch_history_count_key(batch_id), &(index + 1))?;
    Ok(index)
}

/// The entry at `index`, or `None` when `index` is not below the current count.
pub(crate) fn lookup(
    state: &dyn StateAccess,
    batch_id: BatchId,
    index: u32,
) -> Result<Option<HistoryEntry>, LedgerError> {
    if index >= count(state, batch_id)? {
        return Ok(None);
    }
    load(state, &batch_history_key(batch_id, index))
}

/// Every entry of the batch in index order.
pub(crate) fn entries(
    state: &dyn StateAccess,
    batch_id: BatchId,
) -> Result<Vec<HistoryEntry>, LedgerError> {
    let expected = count(state, batch_id)?;
    let prefix = batch_history_prefix(batch_id);
    let mut out = Vec::with_capacity(expected as usize);
    for item in state.prefix_scan(&prefix)? {
        let (key, value) = item?;
        if key[..] != batch_history_key(batch_id, out.len() as u32)[..] {
            return Err(StateError::InvalidValue(format!(
                "history of batch {} is not contiguous at index {}",
                batch_id,
                out.len()
            ))
            .into());
        }
        out.push(codec::from_bytes_canonical(&value).map_err(StateError::Decode)?);
    }
    if out.len() as u32 != expected {
        return Err(StateError::InvalidValue(format!(
            "history of batch {} holds {} entries but its counter says {}",
            batch_id,
            out.len(),
            expected
        ))
        .into());
    }
    Ok(out)
}
