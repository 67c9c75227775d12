//! HTTP adapter for the chat gateway.
//!
//! A bot gateway forwards each inbound chat event here and renders the
//! returned [`dto::OutputResponse`].

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ActionRequest, ErrorResponse, HealthResponse, OutputResponse, TextRequest};
pub use handlers::{GatewayAppState, GatewayError};
pub use routes::{gateway_router, gateway_routes};
