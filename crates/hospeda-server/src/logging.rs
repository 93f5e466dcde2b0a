//! Tracing subscriber setup.

use hospeda_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when `RUST_LOG` is unset, on top of the configured level.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!("{},hospeda=debug,tower_http=debug", config.log_level)
}

/// Installs the global subscriber. `RUST_LOG` wins over configuration.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_configured_level() {
        let config = ObservabilityConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(
            default_directives(&config),
            "warn,hospeda=debug,tower_http=debug"
        );
        assert!(EnvFilter::try_new(default_directives(&config)).is_ok());
    }
}
