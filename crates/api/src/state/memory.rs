// Path: crates/api/src/state/memory.rs

//! An ordered, in-memory implementation of `StateAccess`.

use crate::state::{next_prefix, StateAccess, StateScanIter};
use custody_types::error::StateError;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::Arc;

/// A `BTreeMap`-backed state store.
///
/// Keys iterate in byte order, which is what gives history scans their index
/// order. Suitable for tests, the CLI replay tool, and single-process embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryState {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateAccess for InMemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        log::debug!(
            "[InMemoryState] applying batch: {} inserts, {} deletes",
            inserts.len(),
            deletes.len()
        );
        for key in deletes {
            self.data.remove(key);
        }
        for (key, value) in inserts {
            self.data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let start = Included(prefix.to_vec());
        let end = match next_prefix(prefix) {
            Some(ub) => Excluded(ub),
            None => Unbounded,
        };
        let iter = self
            .data
            .range::<Vec<u8>, _>((start, end))
            .map(|(k, v)| Ok((Arc::from(k.as_slice()), Arc::from(v.as_slice()))));
        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_scan_is_ordered_and_bounded() {
        let mut state = InMemoryState::new();
        state.insert(b"a::2", b"two").unwrap();
        state.insert(b"a::1", b"one").unwrap();
        state.insert(b"b::1", b"other").unwrap();

        let keys: Vec<Vec<u8>> = state
            .prefix_scan(b"a::")
            .unwrap()
            .map(|r| r.unwrap().0.to_vec())
            .collect();
        assert_eq!(keys, vec![b"a::1".to_vec(), b"a::2".to_vec()]);
    }

    #[test]
    fn batch_apply_deletes_then_inserts() {
        let mut state = InMemoryState::new();
        state.insert(b"k", b"old").unwrap();
        state
            .batch_apply(&[(b"k".to_vec(), b"new".to_vec())], &[b"k".to_vec()])
            .unwrap();
        assert_eq!(state.get(b"k").unwrap(), Some(b"new".to_vec()));
        assert_eq!(state.len(), 1);
    }
}
