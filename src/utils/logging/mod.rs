//! Logging setup
//!
//! Installs the global `tracing` subscriber. The filter comes from `RUST_LOG`
//! when set, otherwise from the level passed in.

use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable single-line output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Build the env filter, preferring `RUST_LOG` over the fallback level
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the global subscriber
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(default_level);

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };

    result.map_err(|e| GatewayError::internal(format!("Failed to initialize logging: {}", e)))
}
