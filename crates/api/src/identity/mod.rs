// Path: crates/api/src/identity/mod.rs

//! Defines the `RoleResolver` trait for decoupled user-registry lookups.

use custody_types::app::{AccountId, Role};

/// A read-only view of the user registry.
///
/// The ledger asks the resolver for the caller's role before every transition
/// and never writes to it. `None` means the registry does not know the actor.
pub trait RoleResolver: Send + Sync {
    /// Returns the role registered for `actor`, if any.
    fn resolve_role(&self, actor: &AccountId) -> Option<Role>;
}

impl<T: RoleResolver + ?Sized> RoleResolver for std::sync::Arc<T> {
    fn resolve_role(&self, actor: &AccountId) -> Option<Role> {
        (**self).resolve_role(actor)
    }
}
