// Path: crates/services/src/user_registry/mod.rs
//! An in-memory user registry that assigns a single role to each known principal.

use custody_api::identity::RoleResolver;
use custody_types::app::{AccountId, Role};
use dashmap::DashMap;

/// Maps principals to roles. Assignments may change between calls; the ledger
/// only ever reads the role current at the time of a call.
#[derive(Debug, Default)]
pub struct InMemoryRoleRegistry {
    roles: DashMap<AccountId, Role>,
}

impl InMemoryRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`InMemoryRoleRegistry::assign`].
    pub fn with_role(self, actor: AccountId, role: Role) -> Self {
        self.assign(actor, role);
        self
    }

    /// Assigns `role` to `actor`, returning the role it replaced.
    pub fn assign(&self, actor: AccountId, role: Role) -> Option<Role> {
        let previous = self.roles.insert(actor, role);
        tracing::debug!(target: "user_registry", actor = %actor.short(), %role, "role assigned");
        previous
    }

    /// Forgets `actor`; subsequent lookups report it as unknown.
    pub fn revoke(&self, actor: &AccountId) -> Option<Role> {
        self.roles.remove(actor).map(|(_, role)| role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl RoleResolver for InMemoryRoleRegistry {
    fn resolve_role(&self, actor: &AccountId) -> Option<Role> {
        self.roles.get(actor).map(|r| *r.value())
    }
}
