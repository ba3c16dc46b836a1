//! Structured logging setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set and valid, else the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (tests, embedding).
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = env_filter(config);

    let installed = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(level = %config.level, json = config.json, "logging initialized");
            true
        }
        Err(_) => false,
    }
}
