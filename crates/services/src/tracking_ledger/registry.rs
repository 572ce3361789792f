// Path: crates/services/src/tracking_ledger/registry.rs
//! The batch registry: one lifecycle status record per deposited batch.

use super::{load, store};
use custody_api::state::StateAccess;
use custody_types::app::{BatchId, BatchStatus, MAX_LOCATION_LEN, MAX_MATERIAL_TYPE_LEN};
use custody_types::error::LedgerError;
use custody_types::keys::batch_status_key;
use custody_types::prelude::OptionExt;

pub(crate) fn load_status(
    state: &dyn StateAccess,
    batch_id: BatchId,
) -> Result<Option<BatchStatus>, LedgerError> {
    load(state, &batch_status_key(batch_id))
}

pub(crate) fn store_status(
    state: &mut dyn StateAccess,
    batch_id: BatchId,
    status: &BatchStatus,
) -> Result<(), LedgerError> {
    store(state, &batch_status_key(batch_id), status)
}

/// Loads a batch that must already have been deposited.
pub(crate) fn require_status(
    state: &dyn StateAccess,
    batch_id: BatchId,
) -> Result<BatchStatus, LedgerError> {
    load_status(state, batch_id)?.required(LedgerError::NotFound(batch_id))
}

/// Terminal batches admit no further transitions.
pub(crate) fn require_open(batch_id: BatchId, status: &BatchStatus) -> Result<(), LedgerError> {
    if status.current_status.is_terminal() {
        return Err(LedgerError::InvalidState {
            batch_id,
            status: status.current_status,
        });
    }
    Ok(())
}

/// A batch's timestamp never moves backwards.
pub(crate) fn require_not_before(
    batch_id: BatchId,
    status: &BatchStatus,
    height: u64,
) -> Result<(), LedgerError> {
    if height < status.last_update_timestamp {
        return Err(LedgerError::InvalidInput(format!(
            "batch {} was last updated at {}, call is at {}",
            batch_id, status.last_update_timestamp, height
        )));
    }
    Ok(())
}

/// Shape checks on a deposit's descriptive fields, in the order they are reported.
pub(crate) fn validate_deposit_fields(
    batch_id: BatchId,
    material_type: &str,
    weight: u64,
    deposit_location: &str,
) -> Result<(), LedgerError> {
    if batch_id == 0 {
        return Err(LedgerError::InvalidInput("batch id must be positive".into()));
    }
    bounded_text("material type", material_type, MAX_MATERIAL_TYPE_LEN)?;
    if weight == 0 {
        return Err(LedgerError::InvalidInput("weight must be positive".into()));
    }
    bounded_text("deposit location", deposit_location, MAX_LOCATION_LEN)
}

// Lengths are counted in characters, not bytes.
fn bounded_text(field: &str, value: &str, max: usize) -> Result<(), LedgerError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(LedgerError::InvalidInput(format!("{} must not be empty", field)));
    }
    if len > max {
        return Err(LedgerError::InvalidInput(format!(
            "{} is {} characters, the limit is {}",
            field, len, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_api::state::InMemoryState;
    use custody_types::app::{AccountId, LifecycleStatus};

    fn status(current_status: LifecycleStatus) -> BatchStatus {
        BatchStatus {
            current_status,
            last_update_timestamp: 3,
            current_custodian: AccountId([1; 32]),
            material_type: "glass".into(),
            weight: 12,
            deposit_location: "Depot 4".into(),
        }
    }

    #[test]
    fn missing_batch_is_not_found() {
        let state = InMemoryState::new();
        assert_eq!(load_status(&state, 8).unwrap(), None);
        assert_eq!(require_status(&state, 8), Err(LedgerError::NotFound(8)));
    }

    #[test]
    fn stored_status_reads_back() {
        let mut state = InMemoryState::new();
        store_status(&mut state, 8, &status(LifecycleStatus::Deposited)).unwrap();
        assert_eq!(
            require_status(&state, 8).unwrap(),
            status(LifecycleStatus::Deposited)
        );
    }

    #[test]
    fn terminal_states_are_closed() {
        assert!(require_open(1, &status(LifecycleStatus::Deposited)).is_ok());
        assert!(require_open(1, &status(LifecycleStatus::InTransit)).is_ok());
        for terminal in [LifecycleStatus::Processed, LifecycleStatus::Rejected] {
            assert_eq!(
                require_open(1, &status(terminal)),
                Err(LedgerError::InvalidState {
                    batch_id: 1,
                    status: terminal
                })
            );
        }
    }

    #[test]
    fn timestamps_do_not_go_backwards() {
        let current = status(LifecycleStatus::InTransit);
        assert!(require_not_before(1, &current, 3).is_ok());
        assert!(require_not_before(1, &current, 9).is_ok());
        assert!(matches!(
            require_not_before(1, &current, 2),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn deposit_field_bounds() {
        assert!(validate_deposit_fields(1, "plastic", 100, "LocationX").is_ok());
        assert!(validate_deposit_fields(0, "plastic", 100, "LocationX").is_err());
        assert!(validate_deposit_fields(1, "", 100, "LocationX").is_err());
        assert!(validate_deposit_fields(1, &"m".repeat(50), 100, "LocationX").is_ok());
        assert!(validate_deposit_fields(1, &"m".repeat(51), 100, "LocationX").is_err());
        assert!(validate_deposit_fields(1, "plastic", 0, "LocationX").is_err());
        assert!(validate_deposit_fields(1, "plastic", 100, "").is_err());
        assert!(validate_deposit_fields(1, "plastic", 100, &"l".repeat(100)).is_ok());
        assert!(validate_deposit_fields(1, "plastic", 100, &"l".repeat(101)).is_err());
        // Multi-byte characters count once each.
        assert!(validate_deposit_fields(1, &"é".repeat(50), 100, "LocationX").is_ok());
    }
}
