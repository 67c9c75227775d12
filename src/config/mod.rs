//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PAIRBOT` prefix and
//! nested values are separated by double underscores. Every setting has a
//! default, so an empty environment yields a runnable development config.
//!
//! # Example
//!
//! ```no_run
//! use pairbot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway listening on {:?}", config.server.socket_addr());
//! ```

mod dialogue;
mod error;
mod server;
mod upstream;

pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use upstream::{UpstreamConfig, UpstreamMode};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Gateway server configuration (bind address, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Profile and Pairing Service connections
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Event budgets, photo cap and session eviction
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAIRBOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAIRBOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAIRBOT__UPSTREAM__MODE=in_memory` -> `upstream.mode = in_memory`
    /// - `PAIRBOT__DIALOGUE__PHOTO_TIMEOUT_SECS=30` -> `dialogue.photo_timeout_secs = 30`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAIRBOT")
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
        self.server.validate()?;
        self.upstream.validate()?;
        self.dialogue.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "PAIRBOT__SERVER__PORT",
        "PAIRBOT__SERVER__ENVIRONMENT",
        "PAIRBOT__UPSTREAM__MODE",
        "PAIRBOT__UPSTREAM__PROFILE_URL",
        "PAIRBOT__DIALOGUE__PHOTO_TIMEOUT_SECS",
        "PAIRBOT__DIALOGUE__SESSION_IDLE_TTL_SECS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.mode, UpstreamMode::Http);
        assert_eq!(config.dialogue.lookup_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PAIRBOT__SERVER__PORT", "3000");
        env::set_var("PAIRBOT__UPSTREAM__MODE", "in_memory");
        env::set_var("PAIRBOT__UPSTREAM__PROFILE_URL", "http://localhost:9000");
        env::set_var("PAIRBOT__DIALOGUE__PHOTO_TIMEOUT_SECS", "45");
        env::set_var("PAIRBOT__DIALOGUE__SESSION_IDLE_TTL_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.mode, UpstreamMode::InMemory);
        assert_eq!(config.upstream.profile_url, "http://localhost:9000");
        assert_eq!(config.dialogue.photo_timeout_secs, 45);
        assert!(config.dialogue.sweeper().is_none());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PAIRBOT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.dialogue.max_photo_bytes = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPhotoLimit));

        config.server.port = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
