use tracing_subscriber::{EnvFilter, prelude::*};

use crate::config::LogFormat;
use crate::core::error::{TimeServerError, TimeServerResult};

/// Initialize logging based on environment configuration
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized or skipped
/// - `Err(TimeServerError::LoggingInitialization)` if initialization fails
pub fn init_logging(format: LogFormat) -> TimeServerResult<()> {
    // Check if RUST_LOG is set, skip logging if not
    if std::env::var("RUST_LOG").is_err() {
        return Ok(());
    }

    let env_filter = EnvFilter::from_default_env();
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(true).pretty())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init(),
    };

    result.map_err(|e| TimeServerError::LoggingInitialization(e.to_string()))
}
