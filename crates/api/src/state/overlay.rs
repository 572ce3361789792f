// Path: crates/api/src/state/overlay.rs

//! A copy-on-write state overlay for staging a call's writes.

use crate::state::{next_prefix, StateAccess, StateScanIter};
use custody_types::error::StateError;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::Arc;

/// A batch of key-value pairs to be inserted or updated in the state.
pub type StateInserts = Vec<(Vec<u8>, Vec<u8>)>;

/// A batch of keys to be deleted from the state.
pub type StateDeletes = Vec<Vec<u8>>;

/// A complete set of state changes (inserts/updates and deletes) from one call.
pub type StateChangeSet = (StateInserts, StateDeletes);

/// An in-memory, copy-on-write overlay for any `StateAccess`.
///
/// Reads see the overlay's own writes first and fall through to `base`
/// otherwise. Writes never reach `base`; they are handed back by
/// [`StateOverlay::into_ordered_batch`] for the caller to commit.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    // `None` marks a staged delete.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> StateOverlay<'a> {
    /// Creates a new, empty overlay on top of a base state accessor.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Consumes the overlay and returns its writes in key order.
    pub fn into_ordered_batch(self) -> StateChangeSet {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();
        for (key, value_opt) in self.writes {
            match value_opt {
                Some(value) => inserts.push((key, value)),
                None => deletes.push(key),
            }
        }
        (inserts, deletes)
    }
}

impl<'a> StateAccess for StateOverlay<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            Some(value_opt) => Ok(value_opt.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.delete(key)?;
        }
        for (key, value) in inserts {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let mut merged: BTreeMap<Vec<u8>, Option<Vec<u8>>> = BTreeMap::new();
        for item in self.base.prefix_scan(prefix)? {
            let (k, v) = item?;
            merged.insert(k.to_vec(), Some(v.to_vec()));
        }
        let end = match next_prefix(prefix) {
            Some(ub) => Excluded(ub),
            None => Unbounded,
        };
        for (k, v) in self
            .writes
            .range::<Vec<u8>, _>((Included(prefix.to_vec()), end))
        {
            merged.insert(k.clone(), v.clone());
        }
        let iter = merged
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| Ok((Arc::from(k), Arc::from(v)))));
        Ok(Box::new(iter))
    }
}

/// Runs `f` against a fresh overlay on `state` and commits its writes only if `f` succeeds.
///
/// On error nothing is written, so the store never observes a partial call.
pub fn commit_staged<T, E, F>(state: &mut dyn StateAccess, f: F) -> Result<T, E>
where
    F: FnOnce(&mut StateOverlay<'_>) -> Result<T, E>,
    E: From<StateError>,
{
    let (value, (inserts, deletes)) = {
        let mut overlay = StateOverlay::new(&*state);
        let value = f(&mut overlay)?;
        (value, overlay.into_ordered_batch())
    };
    state.batch_apply(&inserts, &deletes)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryState;

    #[test]
    fn reads_see_staged_writes_and_deletes() {
        let mut base = InMemoryState::new();
        base.insert(b"x::1", b"base").unwrap();
        base.insert(b"x::2", b"gone").unwrap();

        let mut overlay = StateOverlay::new(&base);
        overlay.insert(b"x::1", b"staged").unwrap();
        overlay.delete(b"x::2").unwrap();
        overlay.insert(b"x::3", b"new").unwrap();

        assert_eq!(overlay.get(b"x::1").unwrap(), Some(b"staged".to_vec()));
        assert_eq!(overlay.get(b"x::2").unwrap(), None);

        let scanned: Vec<(Vec<u8>, Vec<u8>)> = overlay
            .prefix_scan(b"x::")
            .unwrap()
            .map(|r| {
                let (k, v) = r.unwrap();
                (k.to_vec(), v.to_vec())
            })
            .collect();
        assert_eq!(
            scanned,
            vec![
                (b"x::1".to_vec(), b"staged".to_vec()),
                (b"x::3".to_vec(), b"new".to_vec()),
            ]
        );
        // Base is untouched until commit.
        assert_eq!(base.get(b"x::1").unwrap(), Some(b"base".to_vec()));
    }

    #[test]
    fn commit_staged_applies_on_success() {
        let mut state = InMemoryState::new();
        let out: Result<u8, StateError> = commit_staged(&mut state, |o| {
            o.insert(b"a", b"1")?;
            o.insert(b"b", b"2")?;
            Ok(7)
        });
        assert_eq!(out.unwrap(), 7);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn commit_staged_discards_on_error() {
        let mut state = InMemoryState::new();
        state.insert(b"a", b"orig").unwrap();
        let out: Result<(), StateError> = commit_staged(&mut state, |o| {
            o.insert(b"a", b"changed")?;
            o.insert(b"b", b"new")?;
            Err(StateError::WriteError("late failure".into()))
        });
        assert!(out.is_err());
        assert_eq!(state.get(b"a").unwrap(), Some(b"orig".to_vec()));
        assert_eq!(state.get(b"b").unwrap(), None);
    }
}
