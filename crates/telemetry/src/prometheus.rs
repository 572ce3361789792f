// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};

struct Collectors {
    transitions_total: IntCounterVec,
    refused_calls_total: IntCounterVec,
    config_changes_total: IntCounterVec,
    errors_total: IntCounterVec,
    dispatch_latency_seconds: HistogramVec,
    dispatch_errors_total: IntCounterVec,
}

// Registered exactly once, by `install`.
static COLLECTORS: OnceCell<Collectors> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

impl LedgerMetricsSink for PrometheusSink {
    fn inc_transition(&self, action: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.transitions_total.with_label_values(&[action]).inc();
        }
    }
    fn inc_refused_call(&self, operation: &'static str, code: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.refused_calls_total
                .with_label_values(&[operation, code])
                .inc();
        }
    }
    fn inc_config_change(&self, setting: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.config_changes_total.with_label_values(&[setting]).inc();
        }
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.errors_total.with_label_values(&[kind, variant]).inc();
        }
    }
}

impl ServiceMetricsSink for PrometheusSink {
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64) {
        if let Some(c) = COLLECTORS.get() {
            c.dispatch_latency_seconds
                .with_label_values(&[service_id, method])
                .observe(duration_secs);
        }
    }
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.dispatch_errors_total
                .with_label_values(&[service_id, method, reason])
                .inc();
        }
    }
}

fn register_collectors() -> Result<Collectors, prometheus::Error> {
    Ok(Collectors {
        transitions_total: register_int_counter_vec!(
            "custody_ledger_transitions_total",
            "Total committed batch transitions, by history action.",
            &["action"]
        )?,
        refused_calls_total: register_int_counter_vec!(
            "custody_ledger_refused_calls_total",
            "Total ledger calls refused, by operation and error code.",
            &["operation", "code"]
        )?,
        config_changes_total: register_int_counter_vec!(
            "custody_ledger_config_changes_total",
            "Total successful configuration changes, by setting.",
            &["setting"]
        )?,
        errors_total: register_int_counter_vec!(
            "custody_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
        dispatch_latency_seconds: register_histogram_vec!(
            "custody_service_dispatch_latency_seconds",
            "Latency of dispatched service calls.",
            &["service_id", "method"],
            exponential_buckets(0.00001, 2.0, 16)?
        )?,
        dispatch_errors_total: register_int_counter_vec!(
            "custody_service_dispatch_errors_total",
            "Total errors returned from service dispatch calls.",
            &["service_id", "method", "reason"]
        )?,
    })
}

/// Registers all collectors with the default Prometheus registry and installs
/// the Prometheus sink as the global `SINK`. Calling it again is a no-op.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    COLLECTORS.get_or_try_init(register_collectors)?;
    // A sink that is already installed stays in place.
    let _ = SINK.set(&PROMETHEUS_SINK);
    Ok(&PROMETHEUS_SINK)
}

/// Renders every metric in the default registry in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
