// Path: crates/api/src/lib.rs

//! # Custody Ledger API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure panic-free code.
//! Panics are disallowed in non-test code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Custody Ledger API
//!
//! Core traits and interfaces for the custody ledger. This crate defines the
//! stable contract between the ledger controller, its state store and the
//! external collaborators it queries.

/// Re-exports all core error types from the central `custody-types` crate.
pub mod error;
/// Defines the `RoleResolver` trait for decoupled user-registry lookups.
pub mod identity;
/// Defines the `ProofOracle` trait for delegated proof verification.
pub mod oracle;
/// Traits for services that are driven by method name and encoded parameters.
pub mod services;
/// Core traits for state management, including `StateAccess` and `StateOverlay`.
pub mod state;
/// The per-call execution context.
pub mod transaction;
