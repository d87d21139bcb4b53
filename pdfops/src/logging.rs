//! Logging setup for applications embedding pdfops.
//!
//! The library itself only emits `tracing` events. Call [`init_logging`]
//! once at startup to print them.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{PdfOpsError, Result};

/// Install a global fmt subscriber filtered at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`. `level` accepts
/// anything [`EnvFilter`] does, e.g. `"info"` or `"pdfops=debug"`.
///
/// # Errors
///
/// Returns an error if `level` is not a valid filter or a global
/// subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| PdfOpsError::invalid_config(format!("Failed to initialize logging: {e}")))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| PdfOpsError::invalid_config(format!("Invalid log level '{level}': {e}")))
}
