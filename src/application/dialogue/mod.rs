//! Dialogue orchestration - the engine behind every chat.
//!
//! The engine owns no transport concerns: it takes an identity and an
//! [`InboundEvent`](crate::domain::dialogue::InboundEvent) and returns one
//! [`EngineReply`].

mod browsing;
mod engine;
mod onboarding;
mod replies;

pub use engine::{DialogueEngine, EngineReply, EventBudgets};
pub use replies::MATCH_FRAGMENT;
