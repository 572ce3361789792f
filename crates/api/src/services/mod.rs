// Path: crates/api/src/services/mod.rs
//! Traits for services driven by method name and canonically encoded parameters.

use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use custody_types::error::TransactionError;
use std::any::Any;

/// The base trait for a ledger service that can be dispatched to by method name.
///
/// Calls are executed strictly one at a time: the `&mut dyn StateAccess` handed
/// to `handle_service_call` is the single writer for the duration of the call.
/// Query methods return their result SCALE-encoded; mutating methods return an
/// empty vector on success.
pub trait LedgerService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    fn id(&self) -> &str;

    /// The version of the call ABI the service implements.
    fn abi_version(&self) -> u32;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Handles a dispatched call. Method names carry an ABI suffix, e.g. `mark_processed@v1`.
    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext,
    ) -> Result<Vec<u8>, TransactionError> {
        let _ = (state, params, ctx);
        Err(TransactionError::Unsupported(format!(
            "Service '{}' does not implement method '{}'",
            self.id(),
            method
        )))
    }
}
