//! Shared plumbing for the JSON-over-HTTP upstream adapters.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::ports::UpstreamError;

/// Connection settings for one upstream service.
#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    /// Base URL, e.g. `http://user_service:50051`.
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Hard cap per request; the engine's event budget is usually shorter.
    pub request_timeout: Duration,
}

impl HttpServiceConfig {
    /// Creates a configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn build_client(&self) -> Result<Client, UpstreamError> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| UpstreamError::unavailable(format!("failed to build HTTP client: {}", e)))
    }
}

/// Maps a transport failure onto the upstream error vocabulary.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout(timeout)
    } else if err.is_connect() {
        UpstreamError::unavailable(format!("connection failed: {}", err))
    } else {
        UpstreamError::unavailable(err.to_string())
    }
}

/// Maps a non-success status onto the upstream error vocabulary.
pub(crate) fn status_error(status: StatusCode, entity: &'static str, body: String) -> UpstreamError {
    match status {
        StatusCode::NOT_FOUND => UpstreamError::not_found(entity),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UpstreamError::unavailable(format!("{}: {}", status, body))
        }
        s if s.is_client_error() => UpstreamError::Rejected(format!("{}: {}", status, body)),
        _ => UpstreamError::unavailable(format!("{}: {}", status, body)),
    }
}

/// Fails on non-success status, otherwise passes the response through.
pub(crate) async fn ensure_success(
    response: Response,
    entity: &'static str,
) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, entity, "Upstream returned error status");
    Err(status_error(status, entity, body))
}

/// Checks the status and decodes a JSON body.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    entity: &'static str,
) -> Result<T, UpstreamError> {
    ensure_success(response, entity)
        .await?
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let config = HttpServiceConfig::new("http://user_service:50051/");
        assert_eq!(config.url("/v1/users/5"), "http://user_service:50051/v1/users/5");
        assert_eq!(config.url("v1/users/5"), "http://user_service:50051/v1/users/5");
    }

    #[test]
    fn builder_overrides_timeouts() {
        let config = HttpServiceConfig::new("http://x")
            .with_connect_timeout(Duration::from_secs(1))
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = status_error(StatusCode::NOT_FOUND, "profile", String::new());
        assert!(err.is_not_found());
    }

    #[test]
    fn client_errors_map_to_rejected() {
        let err = status_error(StatusCode::UNPROCESSABLE_ENTITY, "profile", "bad age".into());
        assert!(matches!(err, UpstreamError::Rejected(ref m) if m.contains("bad age")));
    }

    #[test]
    fn server_errors_map_to_unavailable() {
        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, "profile", String::new());
        assert!(matches!(err, UpstreamError::Unavailable(_)));
        let err = status_error(StatusCode::GATEWAY_TIMEOUT, "profile", String::new());
        assert!(matches!(err, UpstreamError::Unavailable(_)));
    }
}
