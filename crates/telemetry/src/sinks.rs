// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the configured ledger metrics sink, or a no-op sink if none is installed.
pub fn ledger_metrics() -> &'static dyn LedgerMetricsSink {
    SINK.get().map(|s| s.as_ledger()).unwrap_or(&NOP_SINK)
}

/// Returns the configured error metrics sink, or a no-op sink if none is installed.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().map(|s| s.as_errors()).unwrap_or(&NOP_SINK)
}

/// Returns the configured service metrics sink, or a no-op sink if none is installed.
pub fn service_metrics() -> &'static dyn ServiceMetricsSink {
    SINK.get().map(|s| s.as_service()).unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics describing batch lifecycle activity.
pub trait LedgerMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of committed transitions, labeled by history action.
    fn inc_transition(&self, action: &'static str);
    /// Increments the counter of refused calls, labeled by operation and error code.
    fn inc_refused_call(&self, operation: &'static str, code: &'static str);
    /// Increments the counter of configuration changes, labeled by setting.
    fn inc_config_change(&self, setting: &'static str);
}
impl LedgerMetricsSink for NopSink {
    fn inc_transition(&self, _action: &'static str) {}
    fn inc_refused_call(&self, _operation: &'static str, _code: &'static str) {}
    fn inc_config_change(&self, _setting: &'static str) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A sink for service-level metrics related to the generic dispatch mechanism.
pub trait ServiceMetricsSink: Send + Sync + std::fmt::Debug {
    /// Observes the latency of a dispatched `handle_service_call`, labeled by service and method.
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64);
    /// Increments a counter for errors returned from `handle_service_call`, labeled by reason.
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str);
}
impl ServiceMetricsSink for NopSink {
    fn observe_service_dispatch_latency(
        &self,
        _service_id: &str,
        _method: &str,
        _duration_secs: f64,
    ) {
    }
    fn inc_dispatch_error(&self, _service_id: &str, _method: &str, _reason: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: LedgerMetricsSink + ErrorMetricsSink + ServiceMetricsSink {
    /// Views this sink as a `LedgerMetricsSink`.
    fn as_ledger(&self) -> &dyn LedgerMetricsSink;
    /// Views this sink as an `ErrorMetricsSink`.
    fn as_errors(&self) -> &dyn ErrorMetricsSink;
    /// Views this sink as a `ServiceMetricsSink`.
    fn as_service(&self) -> &dyn ServiceMetricsSink;
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T
where
    T: LedgerMetricsSink + ErrorMetricsSink + ServiceMetricsSink,
{
    fn as_ledger(&self) -> &dyn LedgerMetricsSink {
        self
    }
    fn as_errors(&self) -> &dyn ErrorMetricsSink {
        self
    }
    fn as_service(&self) -> &dyn ServiceMetricsSink {
        self
    }
}
