// Path: crates/api/src/oracle/mod.rs

//! Defines the `ProofOracle` trait for delegated proof verification.

use custody_types::app::{AccountId, ProofHash};

/// An external verifier that attests whether a submitted proof is authentic.
///
/// The ledger only consults the oracle once an oracle principal has been
/// configured, and passes that principal along so one implementation can
/// serve several deployments. Verification must be a pure query.
pub trait ProofOracle: Send + Sync {
    /// Returns true if the oracle identified by `oracle` accepts `proof`.
    fn verify_proof(&self, oracle: &AccountId, proof: &ProofHash) -> bool;
}

impl<T: ProofOracle + ?Sized> ProofOracle for std::sync::Arc<T> {
    fn verify_proof(&self, oracle: &AccountId, proof: &ProofHash) -> bool {
        (**self).verify_proof(oracle, proof)
    }
}
