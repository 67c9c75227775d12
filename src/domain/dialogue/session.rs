//! Per-identity conversational session.

use serde::{Deserialize, Serialize};

use super::DialogueState;
use crate::domain::foundation::{Identity, ServiceId, StateMachine, Timestamp, ValidationError};
use crate::domain::profile::ProfileDraft;

/// Opaque pointer to a prospective match, resolved to a full profile only
/// when presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateRef {
    pub service_id: ServiceId,
    pub identity: Identity,
}

impl CandidateRef {
    pub fn new(service_id: ServiceId, identity: Identity) -> Self {
        Self {
            service_id,
            identity,
        }
    }
}

/// Mutable conversational progress of one identity.
///
/// Invariants maintained by the methods below:
/// - `current_target` is `Some` only while `state == Browsing`.
/// - `candidate_queue` never contains the owner.
/// - `draft` is empty on entering onboarding and after submission.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    state: DialogueState,
    draft: ProfileDraft,
    candidate_queue: Vec<CandidateRef>,
    current_target: Option<CandidateRef>,
    updated_at: Timestamp,
}

impl Session {
    /// Creates an idle session for `identity`.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            state: DialogueState::Idle,
            draft: ProfileDraft::default(),
            candidate_queue: Vec::new(),
            current_target: None,
            updated_at: Timestamp::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        self.touch();
        &mut self.draft
    }

    pub fn candidate_queue(&self) -> &[CandidateRef] {
        &self.candidate_queue
    }

    pub fn current_target(&self) -> Option<CandidateRef> {
        self.current_target
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if the session has not been mutated since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.updated_at.is_before(cutoff)
    }

    /// Moves to `target` along a valid edge of the dialogue graph.
    ///
    /// Leaving `Browsing` drops the presented candidate and the rest of the
    /// queue.
    pub fn transition(&mut self, target: DialogueState) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(target)?;
        if self.state != DialogueState::Browsing {
            self.current_target = None;
            self.candidate_queue.clear();
        }
        self.touch();
        Ok(())
    }

    /// Unconditionally parks the session in the menu.
    ///
    /// Used to recover from invariant violations; every state may reach the
    /// menu, so this never fails.
    pub fn force_menu(&mut self) {
        self.state = DialogueState::Menu;
        self.current_target = None;
        self.candidate_queue.clear();
        self.touch();
    }

    /// Enters onboarding at the first question with a clean draft.
    pub fn restart_onboarding(&mut self) {
        self.draft.clear();
        self.state = DialogueState::AskName;
        self.current_target = None;
        self.candidate_queue.clear();
        self.touch();
    }

    /// Clears the draft after a successful submission.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.touch();
    }

    /// Replaces the queue wholesale, in the order received, dropping any
    /// reference to the session owner.
    pub fn load_candidates(&mut self, candidates: Vec<CandidateRef>, own_service_id: ServiceId) {
        let owner = self.identity;
        self.candidate_queue = candidates
            .into_iter()
            .filter(|c| c.identity != owner && c.service_id != own_service_id)
            .collect();
        self.current_target = None;
        self.touch();
    }

    /// Pops the most recently fetched candidate (LIFO) into `current_target`.
    ///
    /// Returns `None` and clears the target once the queue is exhausted.
    pub fn pop_candidate(&mut self) -> Option<CandidateRef> {
        self.current_target = self.candidate_queue.pop();
        self.touch();
        self.current_target
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
