// Path: crates/api/src/transaction/mod.rs
//! The per-call execution context handed to services.

pub mod context;
