//! Dialogue engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{check_timeout, ValidationError};
use crate::adapters::storage::SessionSweeperConfig;
use crate::application::EventBudgets;

/// Per-event budgets, photo cap and session eviction settings
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Budget for start events and button actions, in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,

    /// Budget for free-text events, in seconds
    #[serde(default = "default_text_timeout")]
    pub text_timeout_secs: u64,

    /// Budget for photo events, in seconds
    #[serde(default = "default_photo_timeout")]
    pub photo_timeout_secs: u64,

    /// Largest photo the gateway accepts, in bytes
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,

    /// Sessions untouched for this long are evicted; 0 disables eviction
    #[serde(default = "default_session_idle_ttl")]
    pub session_idle_ttl_secs: u64,

    /// How often idle sessions are swept, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl DialogueConfig {
    pub fn budgets(&self) -> EventBudgets {
        EventBudgets {
            lookup: Duration::from_secs(self.lookup_timeout_secs),
            text: Duration::from_secs(self.text_timeout_secs),
            photo: Duration::from_secs(self.photo_timeout_secs),
        }
    }

    /// Sweeper settings, or `None` when eviction is disabled.
    pub fn sweeper(&self) -> Option<SessionSweeperConfig> {
        (self.session_idle_ttl_secs > 0).then(|| {
            SessionSweeperConfig::default()
                .with_idle_ttl(Duration::from_secs(self.session_idle_ttl_secs))
                .with_interval(Duration::from_secs(self.sweep_interval_secs))
        })
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_timeout("dialogue.lookup_timeout_secs", self.lookup_timeout_secs)?;
        check_timeout("dialogue.text_timeout_secs", self.text_timeout_secs)?;
        check_timeout("dialogue.photo_timeout_secs", self.photo_timeout_secs)?;
        if self.max_photo_bytes == 0 {
            return Err(ValidationError::InvalidPhotoLimit);
        }
        if self.session_idle_ttl_secs > 0 && self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_secs: default_lookup_timeout(),
            text_timeout_secs: default_text_timeout(),
            photo_timeout_secs: default_photo_timeout(),
            max_photo_bytes: default_max_photo_bytes(),
            session_idle_ttl_secs: default_session_idle_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_lookup_timeout() -> u64 {
    10
}

fn default_text_timeout() -> u64 {
    15
}

fn default_photo_timeout() -> u64 {
    20
}

fn default_max_photo_bytes() -> usize {
    8 * 1024 * 1024
}

fn default_session_idle_ttl() -> u64 {
    24 * 60 * 60
}

fn default_sweep_interval() -> u64 {
    300
}
