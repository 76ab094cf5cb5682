//! Health check endpoint.

use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub bot_username: Option<String>,
    pub features: Vec<String>,
    pub uptime_secs: u64,
}

/// Shared state behind the health endpoints.
#[derive(Clone)]
pub struct HealthState {
    start_time: SystemTime,
    bot_username: Arc<RwLock<Option<String>>>,
    features: Vec<String>,
}

impl HealthState {
    pub fn new(features: Vec<String>) -> Self {
        Self {
            start_time: SystemTime::now(),
            bot_username: Arc::new(RwLock::new(None)),
            features,
        }
    }

    /// Recorded once the gateway handshake completes.
    pub async fn set_bot_username(&self, username: String) {
        *self.bot_username.write().await = Some(username);
    }
}

async fn health_handler(State(state): State<HealthState>) -> (StatusCode, Json<HealthReport>) {
    let uptime = state.start_time.elapsed().unwrap_or_default().as_secs();
    let bot_username = state.bot_username.read().await.clone();

    (
        StatusCode::OK,
        Json(HealthReport {
            status: "ok".to_string(),
            bot_username,
            features: state.features.clone(),
            uptime_secs: uptime,
        }),
    )
}

async fn live_handler() -> StatusCode {
    StatusCode::OK
}

pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Serve the health endpoints until the process exits.
pub async fn serve(state: HealthState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Health check server listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
