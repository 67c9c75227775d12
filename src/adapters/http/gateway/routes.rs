//! Axum routes for gateway endpoints.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{action, health, photo, start, text, GatewayAppState};

/// Creates routes for gateway endpoints.
///
/// - POST /v1/chats/:identity/start - Start or resume the dialogue
/// - POST /v1/chats/:identity/text - Free text
/// - POST /v1/chats/:identity/photo - Photo bytes (capped at `max_photo_bytes`)
/// - POST /v1/chats/:identity/action - Button action token
/// - GET /health - Liveness
pub fn gateway_routes(max_photo_bytes: usize) -> Router<GatewayAppState> {
    Router::new()
        .route("/v1/chats/:identity/start", post(start))
        .route("/v1/chats/:identity/text", post(text))
        .route(
            "/v1/chats/:identity/photo",
            post(photo).layer(DefaultBodyLimit::max(max_photo_bytes)),
        )
        .route("/v1/chats/:identity/action", post(action))
        .route("/health", get(health))
}

/// Complete gateway router with tracing and a whole-request timeout.
pub fn gateway_router(state: GatewayAppState, request_timeout: Duration) -> Router {
    let max_photo_bytes = state.max_photo_bytes;
    gateway_routes(max_photo_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_routes_creates_valid_router() {
        let _routes = gateway_routes(1024);
    }
}
