//! Pairbot - conversational session orchestrator for a dating bot.
//!
//! Drives profile onboarding, menu navigation and candidate browsing for many
//! concurrent chat users against two upstream services: a Profile Service and
//! a Pairing Service.
//!
//! Layers:
//! - `domain` - identities, profiles, the dialogue state machine and sessions
//! - `ports` - upstream client contracts and the session store contract
//! - `adapters` - HTTP and in-memory upstream clients, session storage, the
//!   axum gateway
//! - `application` - the `DialogueEngine`
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
