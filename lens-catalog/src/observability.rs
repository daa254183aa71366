//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// JSON lines everywhere except `dev`, which gets human-readable output.
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));

    let installed = if config.service.is_dev() {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };
    installed.map_err(|e| Error::Internal(format!("Failed to initialize tracing: {}", e)))?;

    tracing::info!(
        environment = %config.service.environment,
        "Tracing initialized for service: {}",
        config.service.name
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_fails() {
        let config = Config::default();
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(Error::Internal(_))));
    }
}
