//! Logging setup for the student registry.
//!
//! The filter and line format come from the `logging` config section;
//! RUST_LOG, when set, replaces the configured filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{AppError, AppResult};

/// Parse `EnvFilter` directives such as `alumnos_crud=info,tower_http=warn`.
pub fn parse_filter(directives: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        AppError::Config(format!("logging.filter '{directives}' is invalid: {e}"))
    })
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> AppResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .map_err(|e| AppError::Internal(format!("error installing log subscriber: {e}")))
}

/// Route logs to the test harness output.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("alumnos_crud=debug")
        .try_init();
}
