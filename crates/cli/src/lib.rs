// Path: crates/cli/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Custody Ledger CLI Library
//!
//! The replay engine behind the `custody` binary. A replay builds an in-memory
//! tracking ledger from a [`LedgerConfig`], feeds it a JSON [`Script`] of calls
//! through the ledger's method dispatcher, and reports every call's outcome
//! together with the final state of each batch the script touched.
//!
//! Scripts also drive the two collaborators the ledger only ever reads: steps
//! can grant or revoke roles and allow-list proofs between ledger calls.
//!
//! [`LedgerConfig`]: custody_types::config::LedgerConfig

pub mod replay;
pub mod script;

pub use replay::{replay, replay_files, ReplayReport, Replayer};
pub use script::{Script, Step};
