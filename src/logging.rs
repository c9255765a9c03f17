//! Tracing subscriber setup

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Default filter directive for a configured level: our crate at `level`,
/// dependencies at `warn`.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("warn,citytour={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `verbose` raises the configured level to `debug`.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(level))
            .with_context(|| format!("Invalid log level '{level}'"))?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
