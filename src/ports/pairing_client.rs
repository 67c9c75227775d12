//! Pairing Client Port - contract with the Pairing Service.
//!
//! The Pairing Service owns like/match storage and candidate selection;
//! filtering by gender, age, location and today's likes happens there.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::dialogue::CandidateRef;
use crate::domain::foundation::ServiceId;

/// Port for the Pairing Service.
#[async_trait]
pub trait PairingClient: Send + Sync {
    /// Candidates for the caller, in the order the service ranks them.
    async fn list_candidates(&self, caller: ServiceId) -> Result<Vec<CandidateRef>, UpstreamError>;

    /// Record a like (`is_like == true`) or a dislike.
    async fn submit_like(
        &self,
        from: ServiceId,
        to: ServiceId,
        is_like: bool,
    ) -> Result<(), UpstreamError>;

    /// True when both sides have liked each other.
    async fn check_mutual_match(&self, a: ServiceId, b: ServiceId) -> Result<bool, UpstreamError>;
}
