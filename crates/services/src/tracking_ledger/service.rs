// Path: crates/services/src/tracking_ledger/service.rs
use super::params::{
    BatchQueryParams, FinalizeBatchParams, HistoryEntryQueryParams, LogBatchDepositParams,
    SetMaxHistoryParams, SetOracleContractParams, TransferCustodyParams,
};
use super::TrackingLedger;
use custody_api::services::LedgerService;
use custody_api::state::StateAccess;
use custody_api::transaction::context::TxContext;
use custody_telemetry::service_metrics;
use custody_telemetry::time::DispatchTimer;
use custody_types::codec;
use custody_types::error::{ErrorCode, LedgerError, TransactionError};
use parity_scale_codec::Encode;
use std::any::Any;

fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, TransactionError> {
    codec::to_bytes_canonical(value)
        .map_err(|e| TransactionError::Ledger(LedgerError::Serialization(e)))
}

impl TrackingLedger {
    fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext,
    ) -> Result<Vec<u8>, TransactionError> {
        match method {
            "log_batch_deposit@v1" => {
                let p: LogBatchDepositParams = codec::from_bytes_canonical(params)?;
                self.log_batch_deposit(state, ctx, &p)?;
                Ok(Vec::new())
            }
            "transfer_custody@v1" => {
                let p: TransferCustodyParams = codec::from_bytes_canonical(params)?;
                self.transfer_custody(state, ctx, &p)?;
                Ok(Vec::new())
            }
            "mark_processed@v1" => {
                let p: FinalizeBatchParams = codec::from_bytes_canonical(params)?;
                self.mark_processed(state, ctx, &p)?;
                Ok(Vec::new())
            }
            "reject_batch@v1" => {
                let p: FinalizeBatchParams = codec::from_bytes_canonical(params)?;
                self.reject_batch(state, ctx, &p)?;
                Ok(Vec::new())
            }
            "set_oracle_contract@v1" => {
                let p: SetOracleContractParams = codec::from_bytes_canonical(params)?;
                self.set_oracle_contract(state, ctx, p.oracle)?;
                Ok(Vec::new())
            }
            "set_max_history_per_batch@v1" => {
                let p: SetMaxHistoryParams = codec::from_bytes_canonical(params)?;
                self.set_max_history_per_batch(state, ctx, p.max_history_per_batch)?;
                Ok(Vec::new())
            }
            "get_batch_status@v1" => {
                let p: BatchQueryParams = codec::from_bytes_canonical(params)?;
                encode(&self.get_batch_status(state, p.batch_id)?)
            }
            "get_batch_history_entry@v1" => {
                let p: HistoryEntryQueryParams = codec::from_bytes_canonical(params)?;
                encode(&self.get_batch_history_entry(state, p.batch_id, p.index)?)
            }
            "get_batch_history_count@v1" => {
                let p: BatchQueryParams = codec::from_bytes_canonical(params)?;
                encode(&self.get_batch_history_count(state, p.batch_id)?)
            }
            "get_batch_history@v1" => {
                let p: BatchQueryParams = codec::from_bytes_canonical(params)?;
                encode(&self.get_batch_history(state, p.batch_id)?)
            }
            "get_oracle_contract@v1" => encode(&self.get_oracle_contract(state)?),
            "get_max_history_per_batch@v1" => encode(&self.get_max_history_per_batch(state)?),
            "get_user_registry@v1" => encode(&self.get_user_registry(state)?),
            "get_batch_registry@v1" => encode(&self.get_batch_registry(state)?),
            _ => Err(TransactionError::Unsupported(format!(
                "tracking_ledger does not support method '{}'",
                method
            ))),
        }
    }
}

impl LedgerService for TrackingLedger {
    fn id(&self) -> &str {
        "tracking_ledger"
    }

    fn abi_version(&self) -> u32 {
        1
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext,
    ) -> Result<Vec<u8>, TransactionError> {
        let _timer = DispatchTimer::new(service_metrics(), self.id(), method);
        let result = self.dispatch(state, method, params, ctx);
        if let Err(e) = &result {
            service_metrics().inc_dispatch_error(self.id(), method, e.code());
        }
        result
    }
}
