//! Profile Client Port - contract with the Profile Service.
//!
//! The Profile Service owns user records and photo storage. The dialogue
//! only reads profiles through this port and writes the fields collected
//! during onboarding.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::foundation::{Identity, ServiceId};
use crate::domain::profile::{Profile, ProfileFields};

/// Port for the Profile Service.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    /// Fetch the profile registered for an external identity.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::NotFound` if the identity has not registered.
    async fn get_by_identity(&self, identity: Identity) -> Result<Profile, UpstreamError>;

    /// Fetch a profile by its service id.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::NotFound` if no such profile exists.
    async fn get_by_service_id(&self, id: ServiceId) -> Result<Profile, UpstreamError>;

    /// Register a new, visible profile for `identity`.
    async fn create(
        &self,
        identity: Identity,
        fields: &ProfileFields,
    ) -> Result<Profile, UpstreamError>;

    /// Overwrite the editable fields of an existing profile.
    async fn update(&self, id: ServiceId, fields: &ProfileFields) -> Result<Profile, UpstreamError>;

    /// Upload a photo and attach it to the profile.
    async fn attach_photo(&self, id: ServiceId, photo: Vec<u8>) -> Result<Profile, UpstreamError>;

    /// Show or hide the profile from candidate selection.
    async fn set_visibility(&self, id: ServiceId, visible: bool) -> Result<(), UpstreamError>;
}
