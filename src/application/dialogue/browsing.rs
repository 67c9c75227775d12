//! Browsing: loading candidates, presenting them, and recording decisions.
//!
//! Like submission and the mutual-match check are best-effort side effects.
//! Their failures are logged and recorded as the reply's incident, and the
//! feed always advances to the next candidate.

use super::engine::Turn;
use super::{replies, DialogueEngine};
use crate::domain::dialogue::{CandidateRef, DialogueState, Output};
use crate::domain::foundation::ServiceId;
use crate::domain::profile::Profile;
use crate::ports::UpstreamError;

impl DialogueEngine {
    /// Fetches a fresh candidate list and presents the first card.
    pub(super) async fn start_browsing(&self, turn: &mut Turn) -> Result<Output, UpstreamError> {
        let me = turn
            .call(self.profiles.get_by_identity(turn.session.identity()))
            .await?;
        let candidates = turn
            .call(self.pairing.list_candidates(me.service_id))
            .await
            .map_err(pairing_failure)?;

        turn.session.load_candidates(candidates, me.service_id);
        let queued = turn.session.candidate_queue().len();
        if queued == 0 {
            tracing::debug!("No candidates available");
            return Ok(replies::no_candidates());
        }

        tracing::debug!(queued, "Loaded candidates");
        turn.advance(DialogueState::Browsing);
        Ok(self.next_candidate(turn).await)
    }

    /// Records a like or dislike on the current card and shows the next one.
    pub(super) async fn decide(&self, turn: &mut Turn, is_like: bool) -> Result<Output, UpstreamError> {
        let Some(target) = turn.session.current_target() else {
            tracing::debug!("Decision without a card on screen");
            turn.advance(DialogueState::Menu);
            return Ok(replies::nothing_to_rate());
        };

        let me = turn
            .call(self.profiles.get_by_identity(turn.session.identity()))
            .await?;

        if let Err(err) = turn
            .call(self.pairing.submit_like(me.service_id, target.service_id, is_like))
            .await
        {
            tracing::warn!(error = %err, candidate = %target.service_id, is_like, "Like submission failed");
            turn.note(err);
        }

        let matched = is_like && self.mutual_match(turn, me.service_id, target.service_id).await;
        let next = self.next_candidate(turn).await;

        Ok(if matched {
            next.prefixed(replies::MATCH_FRAGMENT)
        } else {
            next
        })
    }

    /// Pops the next card (LIFO). Never retries a card that fails to load.
    async fn next_candidate(&self, turn: &mut Turn) -> Output {
        let Some(target) = turn.session.pop_candidate() else {
            turn.advance(DialogueState::Menu);
            return replies::candidates_exhausted();
        };

        match self.resolve_candidate(turn, target).await {
            Some(profile) => replies::candidate_card(&profile),
            None => replies::candidate_unavailable(),
        }
    }

    async fn resolve_candidate(&self, turn: &mut Turn, target: CandidateRef) -> Option<Profile> {
        match turn.call(self.profiles.get_by_service_id(target.service_id)).await {
            Ok(profile) => return Some(profile),
            Err(err) => {
                tracing::debug!(%err, service_id = %target.service_id, "Candidate lookup by service id failed, trying identity");
            }
        }

        match turn.call(self.profiles.get_by_identity(target.identity)).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!(error = %err, candidate = %target.identity, "Candidate could not be resolved");
                turn.note(err);
                None
            }
        }
    }

    async fn mutual_match(&self, turn: &mut Turn, me: ServiceId, other: ServiceId) -> bool {
        match turn.call(self.pairing.check_mutual_match(me, other)).await {
            Ok(matched) => {
                if matched {
                    tracing::info!(%me, %other, "Mutual match");
                }
                matched
            }
            Err(err) => {
                tracing::warn!(error = %err, %other, "Match check failed, treating as no match");
                turn.note(err);
                false
            }
        }
    }
}

/// A Pairing Service 404 says nothing about the caller's profile, so it must
/// not reach the onboarding routing reserved for Profile Service lookups.
fn pairing_failure(err: UpstreamError) -> UpstreamError {
    match err {
        UpstreamError::NotFound { entity } => {
            UpstreamError::unavailable(format!("pairing service: {} not found", entity))
        }
        other => other,
    }
}
