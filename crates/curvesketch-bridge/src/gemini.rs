//! Client for the generative-language `generateContent` endpoint.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use curvesketch_core::{GeneratedCurve, extract_json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.4;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
];

const INSTRUCTIONS: &str = r#"You are a geometry API.
Return ONLY valid JSON.
No explanation.

Format:
{
  "anchors": [{ "x": number, "y": number, "z": number }],
  "controls": [
    {
      "cp1": { "x": number, "y": number, "z": number },
      "cp2": { "x": number, "y": number, "z": number }
    }
  ]
}
"#;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Instruction template followed by the user prompt.
pub fn build_prompt(prompt: &str) -> String {
    format!("\n{}\nPrompt:\n{}\n", INSTRUCTIONS, prompt)
}

/// Request body for a single prompt.
pub fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(build_prompt(prompt)),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category: category.to_string(),
                threshold: "BLOCK_NONE".to_string(),
            })
            .collect(),
    }
}

/// Text of the first candidate, all non-empty parts joined by newlines.
pub fn response_text(response: &GenerateContentResponse) -> Result<String, BridgeError> {
    let content = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .ok_or(BridgeError::NoOutput)?;

    let text = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(BridgeError::NoOutput);
    }
    Ok(text)
}

/// Parse a raw `generateContent` reply into a curve.
pub fn parse_response(body: &str) -> Result<GeneratedCurve, BridgeError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| BridgeError::Extract(e.into()))?;
    let text = match response_text(&response) {
        Ok(text) => text,
        Err(e) => {
            error!("Generator raw response: {}", body);
            return Err(e);
        }
    };
    Ok(extract_json(&text)?)
}

/// Talks to the upstream model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Send `prompt` upstream and return the curve found in the reply.
    pub async fn generate_curve(&self, prompt: &str) -> Result<GeneratedCurve, BridgeError> {
        let key = self.api_key.as_deref().ok_or(BridgeError::MissingApiKey)?;

        debug!("Requesting curve from {}", self.endpoint());
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, key)
            .json(&build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BridgeError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let curve = parse_response(&body)?;
        info!(
            "Generated curve: {} anchors, {} control pairs",
            curve.anchors.len(),
            curve.controls.len()
        );
        debug!("{:?}", curve);
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    const CURVE_REPLY: &str = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "```json\n{\"anchors\": [{\"x\": 0, \"y\": 0, \"z\": 0}," },
                    { "text": "{\"x\": 2, \"y\": 0, \"z\": 0}], \"controls\": [{\"cp1\": {\"x\": 0.5, \"y\": 1, \"z\": 0}, \"cp2\": {\"x\": 1.5, \"y\": 1, \"z\": 0}}]}\n```" }
                ]
            }
        }]
    }"#;

    fn config_for(base: String, key: Option<&str>) -> BridgeConfig {
        BridgeConfig {
            api_key: key.map(str::to_string),
            api_base: base,
            model: "gemini-test".to_string(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            env_path: ".env".into(),
        }
    }

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(build_request("a spiral")).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        let text = value["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("You are a geometry API."));
        assert!(text.trim_end().ends_with("Prompt:\na spiral"));
        assert_eq!(value["generationConfig"]["temperature"], 0.4);
        let safety = value["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), 4);
        assert!(safety.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
    }

    #[test]
    fn test_parse_joined_parts() {
        let curve = parse_response(CURVE_REPLY).unwrap();
        assert_eq!(curve.anchors.len(), 2);
        assert_eq!(curve.controls.len(), 1);
        assert_eq!(curve.controls[0].cp2.x, 1.5);
    }

    #[test]
    fn test_no_candidates() {
        assert!(matches!(parse_response("{}"), Err(BridgeError::NoOutput)));
        assert!(matches!(
            parse_response(r#"{"candidates": [{}]}"#),
            Err(BridgeError::NoOutput)
        ));
    }

    #[test]
    fn test_blank_text_is_no_output() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "  "}, {}]}}]}"#;
        assert!(matches!(parse_response(body), Err(BridgeError::NoOutput)));
    }

    #[test]
    fn test_text_without_json() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#;
        assert!(matches!(parse_response(body), Err(BridgeError::Extract(_))));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(&config_for("http://host/v1/".into(), Some("k")));
        assert_eq!(client.endpoint(), "http://host/v1/models/gemini-test:generateContent");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = GeminiClient::new(&config_for("http://127.0.0.1:9/v1".into(), None));
        let result = client.generate_curve("line").await;
        assert!(matches!(result, Err(BridgeError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_generate_against_fake_upstream() {
        async fn handler(request: Request) -> impl IntoResponse {
            let path_ok = request.uri().path().ends_with("/models/gemini-test:generateContent");
            let key = request
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok());
            if key != Some("secret") || !path_ok || request.uri().query().is_some() {
                return (StatusCode::FORBIDDEN, "bad request".to_string());
            }
            (StatusCode::OK, CURVE_REPLY.to_string())
        }

        let base = spawn_upstream(Router::new().fallback(handler)).await;
        let client = GeminiClient::new(&config_for(base, Some("secret")));
        let curve = client.generate_curve("arch").await.unwrap();
        assert_eq!(curve.anchors.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_hides_key() {
        let key = "SUPERSECRETKEY";
        let client = GeminiClient::new(&config_for("http://127.0.0.1:9/v1".into(), Some(key)));

        let err = client.generate_curve("arch").await.unwrap_err();
        assert!(matches!(err, BridgeError::Http(_)));
        assert!(!err.to_string().contains(key));
        assert!(!format!("{:?}", err).contains(key));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains(key));
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::INTERNAL_SERVER_ERROR, "quota exceeded")
        }

        let base = spawn_upstream(Router::new().fallback(handler)).await;
        let client = GeminiClient::new(&config_for(base, Some("secret")));
        match client.generate_curve("arch").await {
            Err(BridgeError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
