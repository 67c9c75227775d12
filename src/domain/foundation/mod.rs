//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and the
//! validation error type that form the vocabulary of the dialogue domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{Identity, ServiceId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
