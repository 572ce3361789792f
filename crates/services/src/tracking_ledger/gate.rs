// Path: crates/services/src/tracking_ledger/gate.rs
//! The authorization and proof-verification gate in front of every transition.

use super::admin;
use custody_api::identity::RoleResolver;
use custody_api::oracle::ProofOracle;
use custody_api::state::StateAccess;
use custody_types::app::{AccountId, BatchStatus, ProofHash, Role, PROOF_LEN};
use custody_types::error::{Denial, LedgerError};

pub(crate) struct Gate<'a> {
    roles: &'a dyn RoleResolver,
    oracle: &'a dyn ProofOracle,
}

impl<'a> Gate<'a> {
    pub(crate) fn new(roles: &'a dyn RoleResolver, oracle: &'a dyn ProofOracle) -> Self {
        Self { roles, oracle }
    }

    /// Fails unless the user registry currently assigns `required` to `actor`.
    pub(crate) fn require_role(&self, actor: &AccountId, required: Role) -> Result<(), LedgerError> {
        match self.roles.resolve_role(actor) {
            Some(actual) if actual == required => Ok(()),
            Some(actual) => Err(LedgerError::Unauthorized(Denial::WrongRole {
                required,
                actual,
            })),
            None => Err(LedgerError::Unauthorized(Denial::UnknownRole)),
        }
    }

    /// Checks the proof's size, then asks the configured oracle to vouch for it.
    ///
    /// A ledger with no oracle configured verifies nothing.
    pub(crate) fn verify_proof(
        &self,
        state: &dyn StateAccess,
        proof: &[u8],
    ) -> Result<ProofHash, LedgerError> {
        let proof = proof_shape(proof)?;
        let oracle = admin::oracle_contract(state)?
            .ok_or_else(|| LedgerError::NotVerified("no proof oracle is configured".into()))?;
        if !self.oracle.verify_proof(&oracle, &proof) {
            return Err(LedgerError::NotVerified(format!(
                "oracle {} rejected proof 0x{}",
                oracle.short(),
                hex::encode(&proof[..4])
            )));
        }
        Ok(proof)
    }
}

pub(crate) fn proof_shape(proof: &[u8]) -> Result<ProofHash, LedgerError> {
    proof.try_into().map_err(|_| {
        LedgerError::InvalidInput(format!(
            "proof must be exactly {} bytes, got {}",
            PROOF_LEN,
            proof.len()
        ))
    })
}

pub(crate) fn require_custodian(status: &BatchStatus, actor: &AccountId) -> Result<(), LedgerError> {
    if status.current_custodian != *actor {
        return Err(LedgerError::Unauthorized(Denial::NotCustodian));
    }
    Ok(())
}
