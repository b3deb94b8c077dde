//! # Logging
//!
//! Global `tracing` subscriber setup. Called once during startup.

use crate::error::{AppError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber at `log_level`.
///
/// `RUST_LOG` takes precedence when set, so individual modules can be tuned without
/// touching `LOG_LEVEL`.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", log_level, e)))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true) // Show module paths
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Config(format!("Failed to set global tracing subscriber: {}", e)))
}
