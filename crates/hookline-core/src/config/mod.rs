//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod hooks;
pub mod logging;
pub mod plan;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::hooks::HooksConfig;
use self::logging::LoggingConfig;
use self::plan::{FireConfig, RegistrationConfig};

use crate::error::{AppError, ErrorKind};

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "HOOKLINE";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (base file + environment overlay + `HOOKLINE__*` variables).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registry defaults.
    #[serde(default)]
    pub hooks: HooksConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Callbacks to register, in order.
    #[serde(default)]
    pub registrations: Vec<RegistrationConfig>,
    /// Hooks to fire after registration, in order.
    #[serde(default)]
    pub fire: Vec<FireConfig>,
}

impl AppConfig {
    /// Load configuration from `config/default` plus an environment overlay
    /// `config/{env}`. Both files are optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::configuration(format!(
                "Config file '{}' does not exist",
                path.display()
            )));
        }

        Self::build(config::Config::builder().add_source(config::File::from(path)))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to deserialize config: {e}"),
                e,
            )
        })?;

        tracing::debug!(
            registrations = config.registrations.len(),
            fires = config.fire.len(),
            "Configuration loaded"
        );

        Ok(config)
    }
}
