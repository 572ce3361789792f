// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Custody Ledger Test Utilities
//!
//! Deterministic principals, proofs and call contexts, on-disk fixture files,
//! and assertion macros shared by the workspace's tests.

pub mod assertions;
pub mod fixtures;

#[doc(hidden)]
pub mod reexports {
    pub use custody_types::error::ErrorCode;
}
