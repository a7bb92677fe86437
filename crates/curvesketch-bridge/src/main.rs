//! curvesketch bridge server
//!
//! Listens on a local address and turns prompts into curve geometry.

use curvesketch_bridge::{BridgeConfig, BridgeError, GeminiClient, router};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), BridgeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curvesketch_bridge=info,tower_http=info".into()),
        )
        .init();

    let config = BridgeConfig::from_env()?;
    config.log_summary();

    let app = router(Arc::new(GeminiClient::new(&config)));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("curvesketch bridge listening on {}", config.listen_addr);
    info!("Prompt endpoint: POST http://{}{}", config.listen_addr, curvesketch_bridge::GENERATE_CURVE_ROUTE);

    axum::serve(listener, app).await?;
    Ok(())
}
