//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional configuration file and
//! from environment variables with the `EDITOR_EVENTS` prefix; nested values
//! use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use editor_events::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Documents resolved against {}", config.storage.root.display());
//! ```

mod email;
mod error;
mod listeners;
mod logging;
mod storage;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use listeners::ListenerConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_ENV: &str = "EDITOR_EVENTS_CONFIG";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// (listener-free) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Document storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listener subscriptions wired into the editor
    #[serde(default)]
    pub listeners: Vec<ListenerConfig>,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `EDITOR_EVENTS_CONFIG`, if set
    /// 3. Overlays environment variables with `EDITOR_EVENTS` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EDITOR_EVENTS__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `EDITOR_EVENTS__EMAIL__RESEND_API_KEY=...` -> `email.resend_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::load_with_file(Some(Path::new(&path))),
            Err(_) => Self::load_with_file(None),
        }
    }

    /// Load configuration from an explicit file plus environment overrides
    ///
    /// The file format is chosen by extension (`.yaml`, `.toml`, `.json`).
    pub fn load_with_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("EDITOR_EVENTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.email.validate()?;
        for listener in &self.listeners {
            listener.validate()?;
        }
        Ok(())
    }

    /// True when any listener sends e-mail
    pub fn has_email_listeners(&self) -> bool {
        self.listeners
            .iter()
            .any(|l| matches!(l, ListenerConfig::Email { .. }))
    }
}
