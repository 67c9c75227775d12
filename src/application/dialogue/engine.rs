//! DialogueEngine - drives one identity's conversation per inbound event.
//!
//! Every event is handled against a snapshot of the identity's session. The
//! snapshot is committed back to the store only when handling finishes, so a
//! cancelled or timed-out event leaves the stored session untouched. Upstream
//! failures never escape as errors: each entry point returns a well-formed
//! [`EngineReply`].
//!
//! # Failure policy
//!
//! | failure | effect |
//! |---|---|
//! | invalid user input | re-prompt, state unchanged |
//! | caller profile not found | route to onboarding (`AskName`) |
//! | any other upstream error or timeout | generic "service unavailable" reply, state unchanged |
//! | like submission / match check | logged, recorded as incident, flow continues |

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::Instrument;
use uuid::Uuid;

use super::{onboarding, replies};
use crate::domain::dialogue::{
    Action, DialogueState, EventCategory, InboundEvent, MenuCommand, Output, Session,
};
use crate::domain::foundation::Identity;
use crate::ports::{PairingClient, ProfileClient, SessionStore, UpstreamError};

/// Time allowed for all upstream calls made while handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBudgets {
    /// Start and button actions.
    pub lookup: Duration,
    /// Free text.
    pub text: Duration,
    /// Photo upload.
    pub photo: Duration,
}

impl Default for EventBudgets {
    fn default() -> Self {
        Self {
            lookup: Duration::from_secs(10),
            text: Duration::from_secs(15),
            photo: Duration::from_secs(20),
        }
    }
}

impl EventBudgets {
    pub fn for_category(&self, category: EventCategory) -> Duration {
        match category {
            EventCategory::Lookup => self.lookup,
            EventCategory::Text => self.text,
            EventCategory::Photo => self.photo,
        }
    }
}

/// Result of handling one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    /// What to show the user.
    pub output: Output,
    /// Upstream failure observed while handling, for observability only.
    pub incident: Option<UpstreamError>,
}

/// Working state of one event: the session snapshot plus the deadline
/// shared by every upstream call made for the event.
pub(super) struct Turn {
    pub(super) session: Session,
    deadline: Instant,
    budget: Duration,
    incident: Option<UpstreamError>,
}

impl Turn {
    fn new(session: Session, budget: Duration) -> Self {
        Self {
            session,
            deadline: Instant::now() + budget,
            budget,
            incident: None,
        }
    }

    /// Awaits an upstream call, failing with `Timeout` past the deadline.
    pub(super) async fn call<T, F>(&self, call: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, UpstreamError>>,
    {
        match timeout_at(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.budget)),
        }
    }

    /// Records a swallowed best-effort failure; the first one wins.
    pub(super) fn note(&mut self, err: UpstreamError) {
        self.incident.get_or_insert(err);
    }

    /// Moves the session to `target`. Staying put is a no-op. An edge the
    /// state machine rejects is an invariant violation and lands in Menu.
    pub(super) fn advance(&mut self, target: DialogueState) {
        let from = self.session.state();
        if from == target {
            return;
        }
        match self.session.transition(target) {
            Ok(()) => tracing::debug!(?from, to = ?target, "State transition"),
            Err(err) => {
                tracing::error!(?from, to = ?target, %err, "Rejected state transition, falling back to menu");
                self.session.force_menu();
            }
        }
    }
}

/// The conversational session orchestrator.
pub struct DialogueEngine {
    pub(super) profiles: Arc<dyn ProfileClient>,
    pub(super) pairing: Arc<dyn PairingClient>,
    sessions: Arc<dyn SessionStore>,
    budgets: EventBudgets,
}

impl DialogueEngine {
    pub fn new(
        profiles: Arc<dyn ProfileClient>,
        pairing: Arc<dyn PairingClient>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            profiles,
            pairing,
            sessions,
            budgets: EventBudgets::default(),
        }
    }

    pub fn with_budgets(mut self, budgets: EventBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn budgets(&self) -> EventBudgets {
        self.budgets
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub async fn on_start(&self, identity: Identity) -> EngineReply {
        self.handle(identity, InboundEvent::Start).await
    }

    pub async fn on_text(&self, identity: Identity, text: impl Into<String>) -> EngineReply {
        self.handle(identity, InboundEvent::Text(text.into())).await
    }

    pub async fn on_photo(&self, identity: Identity, photo: Vec<u8>) -> EngineReply {
        self.handle(identity, InboundEvent::Photo(photo)).await
    }

    pub async fn on_action(&self, identity: Identity, action: Action) -> EngineReply {
        self.handle(identity, InboundEvent::Action(action)).await
    }

    /// Handles `event` within the budget of its category.
    pub async fn handle(&self, identity: Identity, event: InboundEvent) -> EngineReply {
        let budget = self.budgets.for_category(event.category());
        self.handle_within(identity, event, budget).await
    }

    /// Handles `event`, giving up on upstream calls after `budget`.
    pub async fn handle_within(
        &self,
        identity: Identity,
        event: InboundEvent,
        budget: Duration,
    ) -> EngineReply {
        let span = tracing::info_span!(
            "dialogue",
            %identity,
            event = event.kind(),
            correlation_id = %Uuid::new_v4(),
        );
        self.run(identity, event, budget).instrument(span).await
    }

    async fn run(&self, identity: Identity, event: InboundEvent, budget: Duration) -> EngineReply {
        let handle = self.sessions.session(identity);
        let mut turn = Turn::new(handle.snapshot(), budget);

        match self.dispatch(&mut turn, event).await {
            Ok(output) => {
                handle.commit(turn.session);
                EngineReply {
                    output,
                    incident: turn.incident,
                }
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(%err, "Caller has no profile, routing to onboarding");
                turn.session.restart_onboarding();
                handle.commit(turn.session);
                EngineReply {
                    output: replies::profile_missing(),
                    incident: turn.incident,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Upstream call failed, session left unchanged");
                EngineReply {
                    output: replies::service_unavailable(),
                    incident: Some(err),
                }
            }
        }
    }

    async fn dispatch(&self, turn: &mut Turn, event: InboundEvent) -> Result<Output, UpstreamError> {
        match event {
            InboundEvent::Start => self.start(turn).await,
            InboundEvent::Text(text) => self.text(turn, &text).await,
            InboundEvent::Photo(photo) => self.photo(turn, photo).await,
            InboundEvent::Action(action) => self.action(turn, action).await,
        }
    }

    async fn start(&self, turn: &mut Turn) -> Result<Output, UpstreamError> {
        let identity = turn.session.identity();
        match turn.call(self.profiles.get_by_identity(identity)).await {
            Ok(_) => {
                turn.advance(DialogueState::Menu);
                Ok(replies::menu())
            }
            Err(err) if err.is_not_found() => {
                turn.session.restart_onboarding();
                Ok(replies::welcome())
            }
            Err(err) => Err(err),
        }
    }

    async fn text(&self, turn: &mut Turn, text: &str) -> Result<Output, UpstreamError> {
        match turn.session.state() {
            DialogueState::Idle => {
                turn.session.restart_onboarding();
                Ok(replies::restart())
            }
            DialogueState::Menu => match MenuCommand::parse(text) {
                Some(MenuCommand::Browse) => self.start_browsing(turn).await,
                Some(MenuCommand::ViewProfile) => self.show_profile(turn).await,
                Some(MenuCommand::Edit) => {
                    turn.session.restart_onboarding();
                    Ok(replies::edit_profile())
                }
                None => Ok(replies::menu_hint()),
            },
            DialogueState::Browsing => Ok(replies::use_buttons()),
            _ => Ok(onboarding::answer(turn, text)),
        }
    }

    async fn photo(&self, turn: &mut Turn, photo: Vec<u8>) -> Result<Output, UpstreamError> {
        if turn.session.state() != DialogueState::AskPhoto {
            return Ok(replies::photo_not_needed());
        }
        self.submit_profile(turn, photo).await
    }

    async fn action(&self, turn: &mut Turn, action: Action) -> Result<Output, UpstreamError> {
        let state = turn.session.state();

        if let Some(gender) = action.gender() {
            return Ok(match state {
                DialogueState::AskGender => onboarding::accept_gender(turn, gender),
                s if s.is_onboarding() => replies::question(s),
                _ => replies::action_unavailable(),
            });
        }

        if state != DialogueState::Browsing {
            return Ok(replies::action_unavailable());
        }

        match action {
            Action::Like => self.decide(turn, true).await,
            Action::Dislike => self.decide(turn, false).await,
            Action::Sleep => {
                turn.advance(DialogueState::Menu);
                Ok(replies::paused())
            }
            Action::GenderMale | Action::GenderFemale => Ok(replies::action_unavailable()),
        }
    }

    async fn show_profile(&self, turn: &mut Turn) -> Result<Output, UpstreamError> {
        let me = turn
            .call(self.profiles.get_by_identity(turn.session.identity()))
            .await?;
        Ok(replies::own_profile(&me))
    }
}
