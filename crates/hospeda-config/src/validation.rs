//! Configuration validation module.
//!
//! Collects every problem in one pass so a misconfigured deployment fails at
//! startup with the full list instead of one error at a time.

use crate::{AppConfig, RateLimitTier};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (0 cannot be bound).
    InvalidPort { value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Password hash cost is invalid.
    InvalidHashCost { value: u32, minimum: u32, maximum: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// A rate limit tier allows zero requests.
    EmptyRateLimitTier { tier: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { value } => {
                write!(f, "Invalid server port: {} (must be 1-65535)", value)
            }
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({}) cannot be greater than max ({})",
                min, max
            ),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name } => {
                write!(f, "Timeout '{}' must be positive", name)
            }
            Self::InvalidHashCost {
                value,
                minimum,
                maximum,
            } => write!(
                f,
                "Invalid password hash cost: {} (must be between {} and {})",
                value, minimum, maximum
            ),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                value
            ),
            Self::EmptyRateLimitTier { tier } => {
                write!(f, "Rate limit tier '{}' must allow at least one request per non-empty window", tier)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum Argon2 time cost.
    const MIN_HASH_COST: u32 = 1;
    /// Maximum Argon2 time cost.
    const MAX_HASH_COST: u32 = 10;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                value: config.server.port,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
            });
        }

        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);

        let cost = config.security.password_hash_cost;
        if !(Self::MIN_HASH_COST..=Self::MAX_HASH_COST).contains(&cost) {
            errors.push(ConfigValidationError::InvalidHashCost {
                value: cost,
                minimum: Self::MIN_HASH_COST,
                maximum: Self::MAX_HASH_COST,
            });
        }
        if config.security.jwt_access_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "security.jwt_access_expiration_secs".to_string(),
            });
        }

        if config.rate_limit.enabled {
            for (name, tier) in [
                ("general", config.rate_limit.general),
                ("auth", config.rate_limit.auth),
                ("create", config.rate_limit.create),
            ] {
                if Self::tier_is_empty(tier) {
                    errors.push(ConfigValidationError::EmptyRateLimitTier {
                        tier: name.to_string(),
                    });
                }
            }
        }

        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;
        if db.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !db.url.starts_with("mysql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql://".to_string(),
            });
        }

        if db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }
        if db.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let redis = &config.redis;
        if !redis.enabled {
            return;
        }

        match Url::parse(&redis.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(_) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: e.to_string(),
            }),
        }

        for (name, value) in [
            ("redis.command_timeout_ms", redis.command_timeout_ms),
            ("redis.invalidation_timeout_ms", redis.invalidation_timeout_ms),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                });
            }
        }
    }

    const fn tier_is_empty(tier: RateLimitTier) -> bool {
        tier.max_requests == 0 || tier.window_secs == 0
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ConfigValidationError::InvalidUrl { url_type, .. }] if url_type == "database"
        ));
    }

    #[test]
    fn test_redis_url_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.redis.url = "http://nope".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.redis.enabled = false;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_invalidation_timeout_rejected() {
        let mut config = AppConfig::default();
        config.redis.invalidation_timeout_ms = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ConfigValidationError::NonPositiveTimeout { name }] if name == "redis.invalidation_timeout_ms"
        ));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.database.min_connections = 50;
        config.observability.log_level = "loud".to_string();
        config.rate_limit.auth.max_requests = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);

        let report = format_validation_errors(&errors);
        assert!(report.contains("1. Invalid server port"));
        assert!(report.contains("'auth'"));
    }
}
