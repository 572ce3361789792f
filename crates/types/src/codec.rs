// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all stored ledger state.
//!
//! Every record written by the ledger (batch statuses, history entries, counters
//! and configuration scalars) goes through these two functions, so a value has
//! exactly one byte representation no matter which component wrote it.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from its canonical SCALE byte representation.
///
/// Trailing bytes are rejected, so a truncated or padded record never decodes
/// into something that merely looks valid.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
