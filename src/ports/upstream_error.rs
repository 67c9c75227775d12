//! Error vocabulary shared by the upstream service ports.

use std::time::Duration;

/// Failure reported by the Profile Service or the Pairing Service.
///
/// `NotFound` is a domain signal (the caller has no profile yet); every
/// other variant is transient from the dialogue's point of view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Upstream rejected request: {0}")]
    Rejected(String),
}

impl UpstreamError {
    /// Creates a not-found error for the named entity.
    pub fn not_found(entity: &'static str) -> Self {
        UpstreamError::NotFound { entity }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        UpstreamError::Unavailable(message.into())
    }

    /// Returns true for the "no such record" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }

    /// Returns true if the call exceeded its budget.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = UpstreamError::not_found("profile");
        assert!(err.is_not_found());
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "profile not found");
    }

    #[test]
    fn timeout_is_not_not_found() {
        let err = UpstreamError::Timeout(Duration::from_secs(10));
        assert!(err.is_timeout());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("10s"));
    }

    #[test]
    fn unavailable_carries_message() {
        let err = UpstreamError::unavailable("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
