//! HTTP DTOs for gateway endpoints.
//!
//! These types decouple the wire format from the engine's `Output`.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{Output, PhotoRef, ReplySurface};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /v1/chats/:identity/text`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Body of `POST /v1/chats/:identity/action`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    /// One of `like`, `dislike`, `sleep`, `gender_male`, `gender_female`.
    pub action: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Reply to render for the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoRef>,
    pub surface: ReplySurface,
    /// Button labels for `surface`, left to right.
    pub buttons: Vec<String>,
}

impl From<Output> for OutputResponse {
    fn from(output: Output) -> Self {
        Self {
            buttons: output
                .surface
                .buttons()
                .iter()
                .map(|b| b.to_string())
                .collect(),
            text: output.text,
            photo: output.photo,
            surface: output.surface,
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self {
            code: "PAYLOAD_TOO_LARGE".to_string(),
            message: format!("photo exceeds {} bytes", limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_response_lists_surface_buttons() {
        let response = OutputResponse::from(
            Output::text("user2, 24, Kazan").with_surface(ReplySurface::BrowseActions),
        );
        assert_eq!(response.buttons, vec!["❤️", "👎", "💤"]);
        assert_eq!(response.surface, ReplySurface::BrowseActions);
    }

    #[test]
    fn output_response_omits_missing_photo() {
        let json = serde_json::to_value(OutputResponse::from(Output::text("hi"))).unwrap();
        assert!(json.get("photo").is_none());
        assert_eq!(json["surface"], "none");
        assert_eq!(json["buttons"], serde_json::json!([]));
    }

    #[test]
    fn photo_serializes_with_kind_tag() {
        let output = Output::text("x").with_photo(Some(PhotoRef::Url("https://cdn/p.jpg".into())));
        let json = serde_json::to_value(OutputResponse::from(output)).unwrap();
        assert_eq!(json["photo"]["kind"], "url");
        assert_eq!(json["photo"]["value"], "https://cdn/p.jpg");
    }
}
