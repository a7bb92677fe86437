//! Local HTTP surface the sketching front end talks to.

use crate::error::BridgeError;
use crate::generator::CurveGenerator;
use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use curvesketch_core::GeneratedCurve;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

/// Route accepting prompts.
pub const GENERATE_CURVE_ROUTE: &str = "/ai/generate-curve";

/// Body of a prompt request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCurveRequest {
    pub prompt: String,
}

/// Shared server state
struct AppState {
    generator: Arc<dyn CurveGenerator>,
}

/// Build the bridge router around `generator`.
pub fn router(generator: Arc<dyn CurveGenerator>) -> Router {
    let state = Arc::new(AppState { generator });

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route(GENERATE_CURVE_ROUTE, post(generate_curve_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index_handler() -> impl IntoResponse {
    "curvesketch bridge"
}

async fn health_handler() -> impl IntoResponse {
    "ok"
}

async fn generate_curve_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateCurveRequest>,
) -> Result<Json<GeneratedCurve>, BridgeError> {
    let request_id = Uuid::new_v4();
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(BridgeError::EmptyPrompt);
    }

    info!("[{}] Prompt received ({} chars)", request_id, prompt.len());
    match state.generator.generate(prompt).await {
        Ok(curve) => {
            info!("[{}] Curve ready", request_id);
            Ok(Json(curve))
        }
        Err(e) => {
            error!("[{}] Curve generation failed: {}", request_id, e);
            Err(e)
        }
    }
}
