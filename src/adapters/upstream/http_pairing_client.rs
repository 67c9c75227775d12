//! HTTP Pairing Client - `PairingClient` over the Pairing Service's JSON API.
//!
//! | call | request |
//! |---|---|
//! | list_candidates | `GET /v1/candidates/{caller}` |
//! | submit_like | `POST /v1/likes` |
//! | check_mutual_match | `GET /v1/matches/{a}/{b}` |

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http_support::{decode, transport_error, HttpServiceConfig};
use crate::domain::dialogue::CandidateRef;
use crate::domain::foundation::ServiceId;
use crate::ports::{PairingClient, UpstreamError};

#[derive(Debug, Deserialize)]
struct CandidatesResponse {
    #[serde(default)]
    candidates: Option<Vec<CandidateRef>>,
}

#[derive(Debug, Serialize)]
struct LikeRequest {
    from: ServiceId,
    to: ServiceId,
    is_like: bool,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    success: bool,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    matched: bool,
}

/// Pairing Service client.
pub struct HttpPairingClient {
    config: HttpServiceConfig,
    client: Client,
}

impl HttpPairingClient {
    /// Creates a client for the service at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: HttpServiceConfig) -> Result<Self, UpstreamError> {
        let client = config.build_client()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PairingClient for HttpPairingClient {
    async fn list_candidates(&self, caller: ServiceId) -> Result<Vec<CandidateRef>, UpstreamError> {
        let response = self
            .client
            .get(self.config.url(&format!("v1/candidates/{}", caller)))
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        let body: CandidatesResponse = decode(response, "candidates").await?;
        Ok(body.candidates.unwrap_or_default())
    }

    async fn submit_like(
        &self,
        from: ServiceId,
        to: ServiceId,
        is_like: bool,
    ) -> Result<(), UpstreamError> {
        let response = self
            .client
            .post(self.config.url("v1/likes"))
            .json(&LikeRequest { from, to, is_like })
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        let body: LikeResponse = decode(response, "like").await?;
        if body.success {
            Ok(())
        } else {
            Err(UpstreamError::Rejected("like not processed".to_string()))
        }
    }

    async fn check_mutual_match(&self, a: ServiceId, b: ServiceId) -> Result<bool, UpstreamError> {
        let response = self
            .client
            .get(self.config.url(&format!("v1/matches/{}/{}", a, b)))
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        let body: MatchResponse = decode(response, "match").await?;
        Ok(body.matched)
    }
}
