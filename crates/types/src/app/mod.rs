// Path: crates/types/src/app/mod.rs
//! Core application-level data structures: identities, roles and batch records.

/// Data structures for tracked batches and their audit history.
pub mod batch;
/// Data structures for caller identity, including the canonical AccountId and roles.
pub mod identity;

pub use batch::*;
pub use identity::*;

/// Serde helpers that render fixed 32-byte values as hex strings.
///
/// SCALE encoding is unaffected; this only shapes the human-facing JSON and
/// TOML forms.
pub mod hex32 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Parses a 64-character hex string, with or without a `0x` prefix.
    pub fn parse(s: &str) -> Result<[u8; 32], String> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| format!("invalid hex: {}", e))?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("expected 32 bytes, got {}", v.len()))
    }

    /// Serializes 32 bytes as a lowercase hex string.
    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    /// Deserializes 32 bytes from a hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).map_err(D::Error::custom)
    }
}
