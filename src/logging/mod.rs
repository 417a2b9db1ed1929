// Logging module for structured logging using the tracing crate

use std::error::Error;

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Build the event filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, BoxError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    Ok(filter)
}

/// Initialize the global tracing subscriber for structured logging
///
/// The subscriber writes to stderr so command output on stdout stays
/// machine-readable, in either JSON (one object per line) or a
/// human-readable format.
///
/// # Errors
///
/// Returns an error if the level directive cannot be parsed or a global
/// subscriber is already installed.
///
/// # Examples
///
/// ```
/// use imgpath::config::LoggingConfig;
/// use imgpath::logging::init_subscriber;
///
/// init_subscriber(&LoggingConfig::default()).expect("Failed to initialize logging");
///
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), BoxError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config)?)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
}
