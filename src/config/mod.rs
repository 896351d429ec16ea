//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FOUNDATION_FLOW` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment yields a working
//! in-memory setup.
//!
//! # Example
//!
//! ```no_run
//! use foundation_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Debouncing writes by {:?}", config.persistence.debounce());
//! ```

mod error;
mod persistence;
mod storage;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use persistence::PersistenceConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Wizard store backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Debounced write timing
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Logging output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FOUNDATION_FLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FOUNDATION_FLOW__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `FOUNDATION_FLOW__PERSISTENCE__DEBOUNCE_MS=500` -> `persistence.debounce_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FOUNDATION_FLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.persistence.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
