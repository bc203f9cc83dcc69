//! Gateway error taxonomy and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::classify::ClassifyError;

/// Per-request failure modes of the gateway.
///
/// Each variant maps to exactly one HTTP outcome; the `Display` text is the
/// plaintext body the caller receives. Unrecognized URL shapes are a 403,
/// deliberately distinct from the 400 for malformed input.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Invalid GitHub URL format")]
    UnrecognizedUrl,

    #[error("Access denied: User is blacklisted")]
    Blocked,

    #[error("Error proxying request: {0}")]
    Upstream(reqwest::Error),

    #[error("Error proxying API request: {0}")]
    UpstreamApi(reqwest::Error),
}

impl GatewayError {
    /// HTTP status the error terminates the request with.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Classify(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnrecognizedUrl | GatewayError::Blocked => StatusCode::FORBIDDEN,
            GatewayError::Upstream(_) | GatewayError::UpstreamApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
