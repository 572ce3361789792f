// Path: crates/api/src/state/mod.rs
//! Core traits and implementations for ledger state.
//!
//! - `StateAccess`: the key-value interface the ledger reads and writes through.
//! - `StateOverlay`: a copy-on-write layer used to stage a call's writes so that
//!   they reach the underlying store all at once, or not at all.
//! - `InMemoryState`: an ordered in-memory store.

use custody_types::error::StateError;
use std::sync::Arc;

/// An atomically reference-counted, owned key slice.
pub type StateKey = Arc<[u8]>;
/// An atomically reference-counted, owned value slice.
pub type StateVal = Arc<[u8]>;
/// An owned key-value pair from the state, using cheap-to-clone Arcs.
pub type StateKVPair = (StateKey, StateVal);
/// A streaming iterator over key-value pairs from the state, in ascending key order.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + Send + 'a>;

mod accessor;
mod memory;
mod overlay;

pub use accessor::*;
pub use memory::*;
pub use overlay::*;

/// Calculates the smallest byte vector that is strictly greater than all keys
/// starting with the given prefix. Returns None if the prefix is empty or all 0xFF bytes.
pub(crate) fn next_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut ub = prefix.to_vec();
    while let Some(last) = ub.pop() {
        if last != 0xFF {
            ub.push(last + 1);
            return Some(ub);
        }
    }
    None
}
