//! In-memory Pairing Service.
//!
//! Reference semantics for candidate selection and mutual matching, backed
//! by an [`InMemoryProfileClient`] for the profile pool:
//! - candidates: `CandidateFilter` over visible profiles, excluding the
//!   caller and everyone the caller liked today
//! - like: the latest decision from one profile to another wins
//! - match: both sides' latest decision is a like

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::fault_plan::{FaultPlan, PairingOp};
use super::InMemoryProfileClient;
use crate::domain::dialogue::CandidateRef;
use crate::domain::foundation::{ServiceId, Timestamp};
use crate::domain::profile::{CandidateFilter, DEFAULT_CANDIDATE_LIMIT};
use crate::ports::{PairingClient, UpstreamError};

/// A recorded like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeRecord {
    pub from: ServiceId,
    pub to: ServiceId,
    pub is_like: bool,
    pub decided_at: Timestamp,
}

/// In-memory implementation of the PairingClient port.
pub struct InMemoryPairingClient {
    profiles: Arc<InMemoryProfileClient>,
    likes: Mutex<HashMap<(ServiceId, ServiceId), LikeRecord>>,
    scripted: Mutex<HashMap<ServiceId, Vec<CandidateRef>>>,
    limit: usize,
    faults: FaultPlan<PairingOp>,
}

impl InMemoryPairingClient {
    /// Creates a pairing service selecting from `profiles`.
    pub fn new(profiles: Arc<InMemoryProfileClient>) -> Self {
        Self {
            profiles,
            likes: Mutex::new(HashMap::new()),
            scripted: Mutex::new(HashMap::new()),
            limit: DEFAULT_CANDIDATE_LIMIT,
            faults: FaultPlan::default(),
        }
    }

    /// Overrides the per-request candidate cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns exactly `candidates` to `caller` instead of running the filter.
    pub fn script_candidates(&self, caller: ServiceId, candidates: Vec<CandidateRef>) {
        self.scripted.lock().unwrap().insert(caller, candidates);
    }

    /// Every recorded decision, unordered.
    pub fn likes(&self) -> Vec<LikeRecord> {
        self.likes.lock().unwrap().values().copied().collect()
    }

    /// Latest decision from `from` about `to`.
    pub fn decision(&self, from: ServiceId, to: ServiceId) -> Option<LikeRecord> {
        self.likes.lock().unwrap().get(&(from, to)).copied()
    }

    /// Failure injection and call counters.
    pub fn faults(&self) -> &FaultPlan<PairingOp> {
        &self.faults
    }

    fn liked_today(&self, caller: ServiceId) -> Vec<ServiceId> {
        let today = Timestamp::start_of_today();
        self.likes
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.from == caller && r.is_like && !r.decided_at.is_before(&today))
            .map(|r| r.to)
            .collect()
    }

    fn likes_positively(&self, from: ServiceId, to: ServiceId) -> bool {
        self.decision(from, to).is_some_and(|r| r.is_like)
    }
}

#[async_trait]
impl PairingClient for InMemoryPairingClient {
    async fn list_candidates(&self, caller: ServiceId) -> Result<Vec<CandidateRef>, UpstreamError> {
        self.faults.enter(PairingOp::ListCandidates).await?;

        if let Some(scripted) = self.scripted.lock().unwrap().get(&caller) {
            return Ok(scripted.clone());
        }

        let me = self
            .profiles
            .profile(caller)
            .ok_or_else(|| UpstreamError::not_found("profile"))?;
        let filter = CandidateFilter::for_caller(&me, self.liked_today(caller)).with_limit(self.limit);
        let pool = self.profiles.profiles();

        Ok(filter
            .select(&pool)
            .into_iter()
            .map(|p| CandidateRef::new(p.service_id, p.identity))
            .collect())
    }

    async fn submit_like(
        &self,
        from: ServiceId,
        to: ServiceId,
        is_like: bool,
    ) -> Result<(), UpstreamError> {
        self.faults.enter(PairingOp::SubmitLike).await?;
        if from == to {
            return Err(UpstreamError::Rejected("cannot like yourself".to_string()));
        }

        self.likes.lock().unwrap().insert(
            (from, to),
            LikeRecord {
                from,
                to,
                is_like,
                decided_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn check_mutual_match(&self, a: ServiceId, b: ServiceId) -> Result<bool, UpstreamError> {
        self.faults.enter(PairingOp::CheckMutualMatch).await?;
        Ok(self.likes_positively(a, b) && self.likes_positively(b, a))
    }
}
