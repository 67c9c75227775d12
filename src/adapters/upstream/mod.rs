//! Upstream adapters - implementations of the Profile and Pairing ports.
//!
//! - `Http*Client` talk JSON over HTTP to the real services
//! - `InMemory*Client` keep everything in process, with fault injection

mod fault_plan;
mod http_pairing_client;
mod http_profile_client;
mod http_support;
mod in_memory_pairing_client;
mod in_memory_profile_client;

pub use fault_plan::{FaultPlan, PairingOp, ProfileOp};
pub use http_pairing_client::HttpPairingClient;
pub use http_profile_client::HttpProfileClient;
pub use http_support::HttpServiceConfig;
pub use in_memory_pairing_client::{InMemoryPairingClient, LikeRecord};
pub use in_memory_profile_client::InMemoryProfileClient;
