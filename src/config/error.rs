//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Timeout {name} must be between 1 and 300 seconds, got {value}")]
    InvalidTimeout { name: &'static str, value: u64 },

    #[error("Invalid {name} URL: {value}")]
    InvalidServiceUrl { name: &'static str, value: String },

    #[error("Photo size limit must be positive")]
    InvalidPhotoLimit,

    #[error("Sweep interval must be positive when idle eviction is enabled")]
    InvalidSweepInterval,
}

/// Checks a timeout setting against the accepted 1..=300 second range.
pub(crate) fn check_timeout(name: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 || value > 300 {
        return Err(ValidationError::InvalidTimeout { name, value });
    }
    Ok(())
}
