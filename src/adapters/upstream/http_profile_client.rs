//! HTTP Profile Client - `ProfileClient` over the Profile Service's JSON API.
//!
//! # Endpoints
//!
//! | call | request |
//! |---|---|
//! | get_by_identity | `GET /v1/users/by-identity/{identity}` |
//! | get_by_service_id | `GET /v1/users/{id}` |
//! | create | `POST /v1/users` |
//! | update | `PUT /v1/users/{id}` |
//! | attach_photo | `PUT /v1/users/{id}/photo` (raw bytes) |
//! | set_visibility | `PUT /v1/users/{id}/visibility` |
//!
//! A 404 maps to `UpstreamError::NotFound`. No retries happen here; retry
//! policy, if any, belongs to the transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::http_support::{decode, ensure_success, transport_error, HttpServiceConfig};
use crate::domain::foundation::{Identity, ServiceId};
use crate::domain::profile::{Profile, ProfileFields};
use crate::ports::{ProfileClient, UpstreamError};

#[derive(Debug, Serialize)]
struct CreateProfileRequest<'a> {
    identity: Identity,
    #[serde(flatten)]
    fields: &'a ProfileFields,
    visible: bool,
}

#[derive(Debug, Serialize)]
struct VisibilityRequest {
    visible: bool,
}

/// Profile Service client.
pub struct HttpProfileClient {
    config: HttpServiceConfig,
    client: Client,
}

impl HttpProfileClient {
    /// Creates a client for the service at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: HttpServiceConfig) -> Result<Self, UpstreamError> {
        let client = config.build_client()?;
        Ok(Self { config, client })
    }

    fn user_url(&self, id: ServiceId) -> String {
        self.config.url(&format!("v1/users/{}", id))
    }
}

#[async_trait]
impl ProfileClient for HttpProfileClient {
    async fn get_by_identity(&self, identity: Identity) -> Result<Profile, UpstreamError> {
        let response = self
            .client
            .get(self.config.url(&format!("v1/users/by-identity/{}", identity)))
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        decode(response, "profile").await
    }

    async fn get_by_service_id(&self, id: ServiceId) -> Result<Profile, UpstreamError> {
        let response = self
            .client
            .get(self.user_url(id))
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        decode(response, "profile").await
    }

    async fn create(
        &self,
        identity: Identity,
        fields: &ProfileFields,
    ) -> Result<Profile, UpstreamError> {
        let body = CreateProfileRequest {
            identity,
            fields,
            visible: true,
        };
        let response = self
            .client
            .post(self.config.url("v1/users"))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        decode(response, "profile").await
    }

    async fn update(&self, id: ServiceId, fields: &ProfileFields) -> Result<Profile, UpstreamError> {
        let response = self
            .client
            .put(self.user_url(id))
            .json(fields)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        decode(response, "profile").await
    }

    async fn attach_photo(&self, id: ServiceId, photo: Vec<u8>) -> Result<Profile, UpstreamError> {
        let response = self
            .client
            .put(format!("{}/photo", self.user_url(id)))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(photo)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        decode(response, "profile").await
    }

    async fn set_visibility(&self, id: ServiceId, visible: bool) -> Result<(), UpstreamError> {
        let response = self
            .client
            .put(format!("{}/visibility", self.user_url(id)))
            .json(&VisibilityRequest { visible })
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.request_timeout))?;
        ensure_success(response, "profile").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Gender;

    #[test]
    fn create_request_flattens_fields() {
        let fields = ProfileFields {
            name: "Ann".to_string(),
            age: 23,
            city: "Perm".to_string(),
            gender: Gender::Female,
            description: "hi".to_string(),
        };
        let body = CreateProfileRequest {
            identity: Identity::new(77),
            fields: &fields,
            visible: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["identity"], 77);
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["location"], "Perm");
        assert_eq!(json["gender"], "Girl");
        assert_eq!(json["visible"], true);
    }

    #[test]
    fn user_url_uses_service_id() {
        let client = HttpProfileClient::new(HttpServiceConfig::new("http://users:8000")).unwrap();
        assert_eq!(client.user_url(ServiceId::new(9)), "http://users:8000/v1/users/9");
    }
}
