// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]

pub mod proof_oracle;
pub mod tracking_ledger;
pub mod user_registry;

pub use proof_oracle::AllowListProofOracle;
pub use tracking_ledger::TrackingLedger;
pub use user_registry::InMemoryRoleRegistry;
