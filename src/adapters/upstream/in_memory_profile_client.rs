//! In-memory Profile Service.
//!
//! Implements the `ProfileClient` port without a network hop. Useful for:
//! - standalone development (`upstream.mode = in_memory`)
//! - tests that need failure injection or simulated latency

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::fault_plan::{FaultPlan, ProfileOp};
use crate::domain::foundation::{Identity, ServiceId};
use crate::domain::profile::{Profile, ProfileFields};
use crate::ports::{ProfileClient, UpstreamError};

#[derive(Debug, Default)]
struct ProfileDb {
    profiles: BTreeMap<ServiceId, Profile>,
    photos: HashMap<ServiceId, Vec<u8>>,
    next_id: i64,
}

impl ProfileDb {
    fn allocate_id(&mut self) -> ServiceId {
        self.next_id += 1;
        ServiceId::new(self.next_id)
    }
}

/// In-memory implementation of the ProfileClient port.
///
/// Thread-safe via internal `Mutex`. Does not persist data across restarts.
#[derive(Debug, Default)]
pub struct InMemoryProfileClient {
    db: Mutex<ProfileDb>,
    faults: FaultPlan<ProfileOp>,
}

impl InMemoryProfileClient {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the service with existing profiles, keeping their ids.
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let client = Self::new();
        for profile in profiles {
            client.insert(profile);
        }
        client
    }

    /// Stores `profile` as-is, replacing any profile with the same id.
    pub fn insert(&self, profile: Profile) {
        let mut db = self.db.lock().unwrap();
        db.next_id = db.next_id.max(profile.service_id.as_i64());
        db.profiles.insert(profile.service_id, profile);
    }

    /// Removes a profile, as if it was deleted upstream.
    pub fn delete(&self, id: ServiceId) -> Option<Profile> {
        self.db.lock().unwrap().profiles.remove(&id)
    }

    /// Current copy of a profile.
    pub fn profile(&self, id: ServiceId) -> Option<Profile> {
        self.db.lock().unwrap().profiles.get(&id).cloned()
    }

    /// Current copy of the profile registered for `identity`.
    pub fn profile_of(&self, identity: Identity) -> Option<Profile> {
        self.db
            .lock()
            .unwrap()
            .profiles
            .values()
            .find(|p| p.identity == identity)
            .cloned()
    }

    /// Every stored profile, ordered by service id.
    pub fn profiles(&self) -> Vec<Profile> {
        self.db.lock().unwrap().profiles.values().cloned().collect()
    }

    /// Bytes of the last photo attached to `id`.
    pub fn photo_bytes(&self, id: ServiceId) -> Option<Vec<u8>> {
        self.db.lock().unwrap().photos.get(&id).cloned()
    }

    /// Failure injection and call counters.
    pub fn faults(&self) -> &FaultPlan<ProfileOp> {
        &self.faults
    }
}

#[async_trait]
impl ProfileClient for InMemoryProfileClient {
    async fn get_by_identity(&self, identity: Identity) -> Result<Profile, UpstreamError> {
        self.faults.enter(ProfileOp::GetByIdentity).await?;
        self.profile_of(identity)
            .ok_or_else(|| UpstreamError::not_found("profile"))
    }

    async fn get_by_service_id(&self, id: ServiceId) -> Result<Profile, UpstreamError> {
        self.faults.enter(ProfileOp::GetByServiceId).await?;
        self.profile(id)
            .ok_or_else(|| UpstreamError::not_found("profile"))
    }

    async fn create(
        &self,
        identity: Identity,
        fields: &ProfileFields,
    ) -> Result<Profile, UpstreamError> {
        self.faults.enter(ProfileOp::Create).await?;
        let mut db = self.db.lock().unwrap();
        if db.profiles.values().any(|p| p.identity == identity) {
            return Err(UpstreamError::Rejected(format!(
                "profile already exists for identity {}",
                identity
            )));
        }

        let service_id = db.allocate_id();
        let profile = Profile {
            service_id,
            identity,
            name: fields.name.clone(),
            age: fields.age,
            gender: fields.gender,
            location: fields.city.clone(),
            description: fields.description.clone(),
            photo: None,
            visible: true,
        };
        db.profiles.insert(service_id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: ServiceId, fields: &ProfileFields) -> Result<Profile, UpstreamError> {
        self.faults.enter(ProfileOp::Update).await?;
        let mut db = self.db.lock().unwrap();
        let profile = db
            .profiles
            .get_mut(&id)
            .ok_or_else(|| UpstreamError::not_found("profile"))?;

        profile.name = fields.name.clone();
        profile.age = fields.age;
        profile.gender = fields.gender;
        profile.location = fields.city.clone();
        profile.description = fields.description.clone();
        Ok(profile.clone())
    }

    async fn attach_photo(&self, id: ServiceId, photo: Vec<u8>) -> Result<Profile, UpstreamError> {
        self.faults.enter(ProfileOp::AttachPhoto).await?;
        if photo.is_empty() {
            return Err(UpstreamError::Rejected("empty photo".to_string()));
        }

        let mut db = self.db.lock().unwrap();
        let profile = db
            .profiles
            .get_mut(&id)
            .ok_or_else(|| UpstreamError::not_found("profile"))?;
        profile.photo = Some(format!("photos/{}.jpg", id));
        let updated = profile.clone();
        db.photos.insert(id, photo);
        Ok(updated)
    }

    async fn set_visibility(&self, id: ServiceId, visible: bool) -> Result<(), UpstreamError> {
        self.faults.enter(ProfileOp::SetVisibility).await?;
        let mut db = self.db.lock().unwrap();
        let profile = db
            .profiles
            .get_mut(&id)
            .ok_or_else(|| UpstreamError::not_found("profile"))?;
        profile.visible = visible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Gender;

    fn fields() -> ProfileFields {
        ProfileFields {
            name: "Ann".to_string(),
            age: 23,
            city: "Perm".to_string(),
            gender: Gender::Female,
            description: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_makes_visible() {
        let client = InMemoryProfileClient::new();
        let a = client.create(Identity::new(10), &fields()).await.unwrap();
        let b = client.create(Identity::new(20), &fields()).await.unwrap();

        assert_eq!(a.service_id, ServiceId::new(1));
        assert_eq!(b.service_id, ServiceId::new(2));
        assert!(a.visible);
        assert_eq!(a.location, "Perm");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_identity() {
        let client = InMemoryProfileClient::new();
        client.create(Identity::new(10), &fields()).await.unwrap();
        let err = client.create(Identity::new(10), &fields()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Rejected(_)));
    }

    #[tokio::test]
    async fn lookups_report_not_found() {
        let client = InMemoryProfileClient::new();
        assert!(client
            .get_by_identity(Identity::new(1))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(client
            .get_by_service_id(ServiceId::new(1))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn update_overwrites_fields_in_place() {
        let client = InMemoryProfileClient::new();
        let created = client.create(Identity::new(10), &fields()).await.unwrap();
        let mut changed = fields();
        changed.name = "Anna".to_string();

        let updated = client.update(created.service_id, &changed).await.unwrap();
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.service_id, created.service_id);
        assert_eq!(client.profiles().len(), 1);
    }

    #[tokio::test]
    async fn attach_photo_stores_bytes_and_handle() {
        let client = InMemoryProfileClient::new();
        let created = client.create(Identity::new(10), &fields()).await.unwrap();

        let updated = client
            .attach_photo(created.service_id, vec![0xFF, 0xD8])
            .await
            .unwrap();
        assert!(updated.has_photo());
        assert_eq!(client.photo_bytes(created.service_id), Some(vec![0xFF, 0xD8]));
    }

    #[tokio::test]
    async fn set_visibility_toggles_flag() {
        let client = InMemoryProfileClient::new();
        let created = client.create(Identity::new(10), &fields()).await.unwrap();
        client.set_visibility(created.service_id, false).await.unwrap();
        assert!(!client.profile(created.service_id).unwrap().visible);
    }

    #[tokio::test]
    async fn seeded_ids_are_not_reused() {
        let mut seeded = client_profile();
        seeded.service_id = ServiceId::new(40);
        let client = InMemoryProfileClient::with_profiles([seeded]);
        let created = client.create(Identity::new(99), &fields()).await.unwrap();
        assert_eq!(created.service_id, ServiceId::new(41));
    }

    #[tokio::test]
    async fn injected_fault_is_returned() {
        let client = InMemoryProfileClient::new();
        client
            .faults()
            .fail(ProfileOp::GetByIdentity, UpstreamError::unavailable("down"));
        let err = client.get_by_identity(Identity::new(1)).await.unwrap_err();
        assert_eq!(err, UpstreamError::unavailable("down"));
        assert_eq!(client.faults().calls(ProfileOp::GetByIdentity), 1);
    }

    fn client_profile() -> Profile {
        crate::domain::profile::profile::fixtures::profile(1, 1000, Gender::Male, 30)
    }
}
