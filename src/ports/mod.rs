//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue and the outside world. Adapters implement these ports.
//!
//! - `ProfileClient` - Profile Service (user records, photo storage)
//! - `PairingClient` - Pairing Service (candidates, likes, matches)
//! - `SessionStore` - per-identity conversational sessions

mod pairing_client;
mod profile_client;
mod session_store;
mod upstream_error;

pub use pairing_client::PairingClient;
pub use profile_client::ProfileClient;
pub use session_store::{SessionHandle, SessionStore};
pub use upstream_error::UpstreamError;
