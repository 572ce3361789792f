// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Custody Ledger Types
//!
//! This crate is the foundational library for the custody ledger, containing the
//! batch and history records, the caller identity types, the state key layout,
//! configuration objects and every error enum.
//!
//! ## Architectural Role
//!
//! As the base crate, `custody-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. Keeping the stored record
//! definitions here gives the controller, the CLI and the tests one canonical
//! binary representation of ledger state.

/// Application-level records: accounts, roles, batches and history entries.
pub mod app;
/// The canonical, deterministic binary codec for stored ledger state.
pub mod codec;
/// Configuration structures loaded at genesis.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Constants and builders for the state keys owned by the ledger.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
