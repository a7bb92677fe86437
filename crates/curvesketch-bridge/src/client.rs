//! Front-end side of the bridge protocol.

use crate::error::ErrorBody;
use crate::server::{GENERATE_CURVE_ROUTE, GenerateCurveRequest};
use curvesketch_core::GeneratedCurve;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Bridge request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Bridge rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Calls a running bridge.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the bridge for a curve. Import the result with
    /// [`curvesketch_core::Scene::import_generated`].
    pub async fn generate_curve(&self, prompt: &str) -> Result<GeneratedCurve, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, GENERATE_CURVE_ROUTE))
            .json(&GenerateCurveRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Whether the bridge answers its health check.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}
