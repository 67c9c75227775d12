//! HTTP handlers for gateway endpoints.
//!
//! These handlers translate gateway requests into engine events. They never
//! see session internals; every successful call returns one `OutputResponse`.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use super::dto::{ActionRequest, ErrorResponse, HealthResponse, OutputResponse, TextRequest};
use crate::application::{DialogueEngine, EngineReply};
use crate::domain::dialogue::Action;
use crate::domain::foundation::Identity;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for gateway handlers.
#[derive(Clone)]
pub struct GatewayAppState {
    pub engine: Arc<DialogueEngine>,
    /// Largest accepted photo body, in bytes.
    pub max_photo_bytes: usize,
}

impl GatewayAppState {
    pub fn new(engine: Arc<DialogueEngine>, max_photo_bytes: usize) -> Self {
        Self {
            engine,
            max_photo_bytes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Chat events
// ════════════════════════════════════════════════════════════════════════════════

/// POST /v1/chats/:identity/start - User opened the chat or sent /start.
///
/// # Errors
/// - 400 Bad Request: identity is not a number
pub async fn start(
    State(state): State<GatewayAppState>,
    Path(identity): Path<String>,
) -> Result<Json<OutputResponse>, GatewayError> {
    let identity = parse_identity(&identity)?;
    Ok(render(state.engine.on_start(identity).await))
}

/// POST /v1/chats/:identity/text - Free text from the user.
///
/// Browse button labels (❤️ / 👎 / 💤) arrive as text from reply keyboards
/// and are handled as the matching action.
///
/// # Errors
/// - 400 Bad Request: identity is not a number
pub async fn text(
    State(state): State<GatewayAppState>,
    Path(identity): Path<String>,
    Json(request): Json<TextRequest>,
) -> Result<Json<OutputResponse>, GatewayError> {
    let identity = parse_identity(&identity)?;
    let reply = match Action::from_browse_label(&request.text) {
        Some(action) => state.engine.on_action(identity, action).await,
        None => state.engine.on_text(identity, request.text).await,
    };
    Ok(render(reply))
}

/// POST /v1/chats/:identity/photo - Photo bytes from the user.
///
/// # Errors
/// - 400 Bad Request: identity is not a number
/// - 413 Payload Too Large: body exceeds `max_photo_bytes`
pub async fn photo(
    State(state): State<GatewayAppState>,
    Path(identity): Path<String>,
    body: Bytes,
) -> Result<Json<OutputResponse>, GatewayError> {
    let identity = parse_identity(&identity)?;
    if body.len() > state.max_photo_bytes {
        return Err(GatewayError::PhotoTooLarge(state.max_photo_bytes));
    }
    Ok(render(state.engine.on_photo(identity, body.to_vec()).await))
}

/// POST /v1/chats/:identity/action - Inline button press.
///
/// # Errors
/// - 400 Bad Request: identity is not a number, or unknown action token
pub async fn action(
    State(state): State<GatewayAppState>,
    Path(identity): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<OutputResponse>, GatewayError> {
    let identity = parse_identity(&identity)?;
    let action = Action::from_str(&request.action)
        .map_err(|_| GatewayError::UnknownAction(request.action.clone()))?;
    Ok(render(state.engine.on_action(identity, action).await))
}

/// GET /health - Liveness probe.
pub async fn health(State(state): State<GatewayAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: state.engine.sessions().len(),
    })
}

fn parse_identity(raw: &str) -> Result<Identity, GatewayError> {
    Identity::from_str(raw).map_err(|_| GatewayError::InvalidIdentity(raw.to_string()))
}

fn render(reply: EngineReply) -> Json<OutputResponse> {
    if let Some(incident) = &reply.incident {
        tracing::debug!(%incident, "Replying after upstream incident");
    }
    Json(OutputResponse::from(reply.output))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for gateway endpoints.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Photo exceeds {0} bytes")]
    PhotoTooLarge(usize),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match &self {
            GatewayError::InvalidIdentity(_) | GatewayError::UnknownAction(_) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(self.to_string()))
            }
            GatewayError::PhotoTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::payload_too_large(*limit),
            ),
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_response {
        use super::*;

        #[test]
        fn invalid_identity_is_bad_request() {
            let response = GatewayError::InvalidIdentity("abc".into()).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[test]
        fn unknown_action_is_bad_request() {
            let response = GatewayError::UnknownAction("wink".into()).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[test]
        fn oversized_photo_is_payload_too_large() {
            let response = GatewayError::PhotoTooLarge(10).into_response();
            assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        }
    }

    #[test]
    fn identity_must_be_numeric() {
        assert_eq!(parse_identity(" 42 ").unwrap(), Identity::new(42));
        assert!(matches!(
            parse_identity("me"),
            Err(GatewayError::InvalidIdentity(_))
        ));
    }
}
