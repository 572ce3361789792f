// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Output format for the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for machine consumption.
    #[default]
    Json,
    /// Human-readable single-line output.
    Compact,
}

/// Initializes the global `tracing` subscriber and bridges `log` records into it.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Logs go to stderr
/// so that stdout stays free for command output.
pub fn init_tracing(format: LogFormat) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_log::LogTracer::init()?;
    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339());
            tracing::subscriber::set_global_default(Registry::default().with(filter).with(fmt_layer))?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false);
            tracing::subscriber::set_global_default(Registry::default().with(filter).with(fmt_layer))?;
        }
    }
    Ok(())
}
