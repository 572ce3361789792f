// Path: crates/services/src/tracking_ledger/admin.rs
//! Ledger configuration scalars: the write-once oracle principal, the history
//! ceiling and the two opaque registry references.

use super::{load, store};
use custody_api::state::StateAccess;
use custody_types::app::{AccountId, DEFAULT_MAX_HISTORY_PER_BATCH};
use custody_types::config::LedgerConfig;
use custody_types::error::LedgerError;
use custody_types::keys::{
    BATCH_REGISTRY_KEY, MAX_HISTORY_PER_BATCH_KEY, ORACLE_CONTRACT_KEY, USER_REGISTRY_KEY,
};

pub(crate) fn oracle_contract(state: &dyn StateAccess) -> Result<Option<AccountId>, LedgerError> {
    load(state, ORACLE_CONTRACT_KEY)
}

pub(crate) fn max_history_per_batch(state: &dyn StateAccess) -> Result<u32, LedgerError> {
    Ok(load(state, MAX_HISTORY_PER_BATCH_KEY)?.unwrap_or(DEFAULT_MAX_HISTORY_PER_BATCH))
}

pub(crate) fn user_registry(state: &dyn StateAccess) -> Result<AccountId, LedgerError> {
    Ok(load(state, USER_REGISTRY_KEY)?.unwrap_or(AccountId::PLACEHOLDER))
}

pub(crate) fn batch_registry(state: &dyn StateAccess) -> Result<AccountId, LedgerError> {
    Ok(load(state, BATCH_REGISTRY_KEY)?.unwrap_or(AccountId::PLACEHOLDER))
}

/// The oracle may be set exactly once, and never to the placeholder.
pub(crate) fn set_oracle_contract(
    state: &mut dyn StateAccess,
    oracle: AccountId,
) -> Result<(), LedgerError> {
    if oracle.is_placeholder() {
        return Err(LedgerError::InvalidInput(
            "oracle must not be the placeholder principal".into(),
        ));
    }
    if let Some(current) = oracle_contract(state)? {
        return Err(LedgerError::ConfigConflict(format!(
            "oracle is already set to {}",
            current
        )));
    }
    store(state, ORACLE_CONTRACT_KEY, &oracle)
}

/// The ceiling only moves once an oracle exists, and only to a positive value.
///
/// Lowering it below a batch's current count is allowed; that batch simply
/// accepts no further transitions.
pub(crate) fn set_max_history_per_batch(
    state: &mut dyn StateAccess,
    max: u32,
) -> Result<(), LedgerError> {
    if max == 0 {
        return Err(LedgerError::InvalidInput(
            "max_history_per_batch must be positive".into(),
        ));
    }
    if oracle_contract(state)?.is_none() {
        return Err(LedgerError::ConfigConflict(
            "the oracle must be configured before the history ceiling".into(),
        ));
    }
    store(state, MAX_HISTORY_PER_BATCH_KEY, &max)
}

/// Writes a genesis configuration. The oracle, when present, is subject to the
/// same write-once rule as [`set_oracle_contract`].
pub(crate) fn seed(state: &mut dyn StateAccess, config: &LedgerConfig) -> Result<(), LedgerError> {
    store(state, MAX_HISTORY_PER_BATCH_KEY, &config.max_history_per_batch)?;
    store(state, USER_REGISTRY_KEY, &config.user_registry)?;
    store(state, BATCH_REGISTRY_KEY, &config.batch_registry)?;
    if let Some(oracle) = config.oracle {
        set_oracle_contract(state, oracle)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_api::state::InMemoryState;

    #[test]
    fn defaults_apply_to_an_empty_store() {
        let state = InMemoryState::new();
        assert_eq!(oracle_contract(&state).unwrap(), None);
        assert_eq!(max_history_per_batch(&state).unwrap(), 50);
        assert!(user_registry(&state).unwrap().is_placeholder());
        assert!(batch_registry(&state).unwrap().is_placeholder());
    }

    #[test]
    fn oracle_is_write_once() {
        let mut state = InMemoryState::new();
        assert!(matches!(
            set_oracle_contract(&mut state, AccountId::PLACEHOLDER),
            Err(LedgerError::InvalidInput(_))
        ));
        set_oracle_contract(&mut state, AccountId([5; 32])).unwrap();
        assert!(matches!(
            set_oracle_contract(&mut state, AccountId([6; 32])),
            Err(LedgerError::ConfigConflict(_))
        ));
        assert_eq!(oracle_contract(&state).unwrap(), Some(AccountId([5; 32])));
    }

    #[test]
    fn ceiling_requires_oracle_and_a_positive_value() {
        let mut state = InMemoryState::new();
        assert!(matches!(
            set_max_history_per_batch(&mut state, 10),
            Err(LedgerError::ConfigConflict(_))
        ));
        set_oracle_contract(&mut state, AccountId([5; 32])).unwrap();
        assert!(matches!(
            set_max_history_per_batch(&mut state, 0),
            Err(LedgerError::InvalidInput(_))
        ));
        set_max_history_per_batch(&mut state, 10).unwrap();
        assert_eq!(max_history_per_batch(&state).unwrap(), 10);
    }

    #[test]
    fn seed_writes_every_scalar() {
        let mut state = InMemoryState::new();
        let config = LedgerConfig {
            max_history_per_batch: 4,
            oracle: Some(AccountId([5; 32])),
            user_registry: AccountId([6; 32]),
            batch_registry: AccountId([7; 32]),
        };
        seed(&mut state, &config).unwrap();
        assert_eq!(max_history_per_batch(&state).unwrap(), 4);
        assert_eq!(oracle_contract(&state).unwrap(), Some(AccountId([5; 32])));
        assert_eq!(user_registry(&state).unwrap(), AccountId([6; 32]));
        assert_eq!(batch_registry(&state).unwrap(), AccountId([7; 32]));
    }
}
