//! Application layer - orchestrates the domain against the ports.

pub mod dialogue;

pub use dialogue::{DialogueEngine, EngineReply, EventBudgets, MATCH_FRAGMENT};
