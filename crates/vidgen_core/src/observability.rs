//! Tracing subscriber setup.

use tracing::info;
use tracing_subscriber::EnvFilter;
use vidgen_error::ConfigError;

/// Install a formatted tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (for example
/// `"vidgen=info"`) selects what is logged.
///
/// # Errors
///
/// Fails when the directive does not parse or a global subscriber is
/// already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| {
            ConfigError::new(format!("Invalid log directive {}: {}", default_directive, e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    info!(default_directive, "Tracing initialized");
    Ok(())
}
