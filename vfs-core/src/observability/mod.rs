//! Observability infrastructure: tracing and metrics.
//!
//! Library code only emits spans, events and metric updates. Binaries call
//! [`init`] once to install a subscriber; a host process that embeds the
//! core may install its own subscriber and metrics recorder instead.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod metrics;

/// Initialize global tracing and register metric descriptions.
///
/// `RUST_LOG` controls filtering; the default level is `info`.
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()?;

    metrics::register_core_metrics();

    tracing::debug!("Observability initialized");
    Ok(())
}
