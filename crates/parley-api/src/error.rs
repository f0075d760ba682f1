use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) calls.
///
/// Nothing is retried; every failure reaches the caller as one of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, TLS failure or timeout.
    #[error("Transport error: {0}")]
    Transport(Box<reqwest::Error>),

    /// The backend rejected the credentials (401 or 403).
    #[error("Authentication failed ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Auth { status: u16, message: Option<String> },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request was rejected locally before it was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(e))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
