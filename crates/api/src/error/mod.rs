// Path: crates/api/src/error/mod.rs
//! Re-exports all core error types from the central `custody-types` crate.

pub use custody_types::error::*;
