// Path: crates/services/src/proof_oracle/mod.rs
//! A proof oracle that accepts exactly the proofs it has been told about.

use custody_api::oracle::ProofOracle;
use custody_types::app::{AccountId, ProofHash};
use dashmap::DashSet;

/// Accepts a proof only if it was allow-listed for the oracle principal that is
/// asking. Proofs allow-listed under one principal are unknown to every other.
#[derive(Debug, Default)]
pub struct AllowListProofOracle {
    accepted: DashSet<(AccountId, ProofHash)>,
}

impl AllowListProofOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`AllowListProofOracle::accept`].
    pub fn with_proof(self, oracle: AccountId, proof: ProofHash) -> Self {
        self.accept(oracle, proof);
        self
    }

    /// Allow-lists `proof` under `oracle`. Returns false if it was already accepted.
    pub fn accept(&self, oracle: AccountId, proof: ProofHash) -> bool {
        self.accepted.insert((oracle, proof))
    }

    /// Withdraws a previously accepted proof.
    pub fn revoke(&self, oracle: &AccountId, proof: &ProofHash) -> bool {
        self.accepted.remove(&(*oracle, *proof)).is_some()
    }
}

impl ProofOracle for AllowListProofOracle {
    fn verify_proof(&self, oracle: &AccountId, proof: &ProofHash) -> bool {
        let verified = self.accepted.contains(&(*oracle, *proof));
        tracing::trace!(
            target: "proof_oracle",
            oracle = %oracle.short(),
            proof = %hex::encode(proof),
            verified,
            "proof checked"
        );
        verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_allow_listed_proofs() {
        let oracle = AccountId([9; 32]);
        let verifier = AllowListProofOracle::new().with_proof(oracle, [1; 32]);
        assert!(verifier.verify_proof(&oracle, &[1; 32]));
        assert!(!verifier.verify_proof(&oracle, &[2; 32]));
    }

    #[test]
    fn proofs_are_scoped_to_their_oracle() {
        let verifier = AllowListProofOracle::new().with_proof(AccountId([9; 32]), [1; 32]);
        assert!(!verifier.verify_proof(&AccountId([8; 32]), &[1; 32]));
    }

    #[test]
    fn revoked_proof_no_longer_verifies() {
        let oracle = AccountId([9; 32]);
        let verifier = AllowListProofOracle::new();
        assert!(verifier.accept(oracle, [1; 32]));
        assert!(!verifier.accept(oracle, [1; 32]));
        assert!(verifier.revoke(&oracle, &[1; 32]));
        assert!(!verifier.verify_proof(&oracle, &[1; 32]));
    }
}
