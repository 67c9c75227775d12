//! Dialogue module - the conversational state machine and the values that
//! flow in and out of it.
//!
//! - `DialogueState` - node of the per-user state machine
//! - `Session` - mutable progress of one identity (draft, candidate queue)
//! - `InboundEvent` / `Action` / `MenuCommand` - what the gateway sends in
//! - `Output` - what the gateway renders

mod event;
mod output;
mod session;
mod state;

pub use event::{Action, EventCategory, InboundEvent, MenuCommand};
pub use output::{Output, PhotoRef, ReplySurface, STORAGE_HANDLE_PREFIX};
pub use session::{CandidateRef, Session};
pub use state::DialogueState;
