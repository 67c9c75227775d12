//! Upstream service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{check_timeout, ValidationError};
use crate::adapters::upstream::HttpServiceConfig;

/// Which upstream adapters to wire.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamMode {
    /// Profile and Pairing services over HTTP.
    #[default]
    Http,
    /// In-process services, for standalone development.
    InMemory,
}

/// Profile and Pairing Service connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub mode: UpstreamMode,

    /// Profile Service base URL
    #[serde(default = "default_profile_url")]
    pub profile_url: String,

    /// Pairing Service base URL
    #[serde(default = "default_pairing_url")]
    pub pairing_url: String,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Client settings for the Profile Service.
    pub fn profile_service(&self) -> HttpServiceConfig {
        HttpServiceConfig::new(&self.profile_url).with_connect_timeout(self.connect_timeout())
    }

    /// Client settings for the Pairing Service.
    pub fn pairing_service(&self) -> HttpServiceConfig {
        HttpServiceConfig::new(&self.pairing_url).with_connect_timeout(self.connect_timeout())
    }

    /// Validate upstream configuration. URLs are only checked in HTTP mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_timeout("upstream.connect_timeout_secs", self.connect_timeout_secs)?;
        if self.mode == UpstreamMode::Http {
            check_url("profile", &self.profile_url)?;
            check_url("pairing", &self.pairing_url)?;
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            mode: UpstreamMode::default(),
            profile_url: default_profile_url(),
            pairing_url: default_pairing_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ValidationError> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidServiceUrl {
            name,
            value: value.to_string(),
        }),
    }
}

fn default_profile_url() -> String {
    "http://user_service:50051".to_string()
}

fn default_pairing_url() -> String {
    "http://match_service:50052".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}
