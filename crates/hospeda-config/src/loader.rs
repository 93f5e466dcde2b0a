//! Configuration loader with layered sources.

use crate::validation::{format_validation_errors, ConfigValidator};
use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use hospeda_core::HospedaError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable selecting the environment-specific file.
pub const ENVIRONMENT_VAR: &str = "HOSPEDA_ENV";

/// Prefix for environment overrides, e.g. `HOSPEDA__REDIS__ENABLED=false`.
pub const ENV_PREFIX: &str = "HOSPEDA";

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
}

impl ConfigLoader {
    /// Creates a loader for `config_dir`, picking the environment from
    /// `HOSPEDA_ENV` (default `development`).
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `HOSPEDA__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment.
    pub fn with_environment(config_dir: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: environment.into(),
        }
    }

    /// Loader rooted at `./config`.
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads, merges and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, HospedaError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        info!(environment = %self.environment, "Loading configuration");

        let mut builder = Config::builder();
        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder
            .set_override("app.environment", self.environment.clone())
            .map_err(config_error_to_hospeda_error)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_hospeda_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), HospedaError> {
        if config.app.is_production() && config.security.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        ConfigValidator::validate(config)
            .map_err(|errors| HospedaError::Configuration(format_validation_errors(&errors)))
    }
}

fn config_error_to_hospeda_error(err: ConfigError) -> HospedaError {
    HospedaError::Configuration(err.to_string())
}
