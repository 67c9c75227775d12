//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue engine to the outside world:
//! - `http` - the chat gateway surface (axum)
//! - `storage` - session storage and idle eviction
//! - `upstream` - Profile and Pairing Service clients (HTTP and in-memory)

pub mod http;
pub mod storage;
pub mod upstream;
