//! Bridge errors and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use curvesketch_core::ExtractError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while serving a prompt.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("GOOGLE_API_KEY is missing")]
    MissingApiKey,
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("Request failed: {0}")]
    Http(reqwest::Error),
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("No generator output")]
    NoOutput,
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// HTTP status reported to the front end.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt => StatusCode::BAD_REQUEST,
            Self::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            Self::Http(_) | Self::UpstreamStatus { .. } | Self::NoOutput | Self::Extract(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for BridgeError {
    /// Drops the request URL, which may carry credentials.
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

/// Error payload returned to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(BridgeError::EmptyPrompt.status(), StatusCode::BAD_REQUEST);
        assert_eq!(BridgeError::MissingApiKey.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(BridgeError::NoOutput.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            BridgeError::Extract(ExtractError::NoJsonObject).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BridgeError::Config("bad".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_extract_message_passes_through() {
        let err = BridgeError::from(ExtractError::NoJsonObject);
        assert_eq!(err.to_string(), "No JSON object found");
    }
}
