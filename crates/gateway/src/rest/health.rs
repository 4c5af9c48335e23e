//! Liveness check and the realtime settings the dashboard polls with

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RealtimeConfigResponse {
    /// How often the dashboard should refetch, in seconds
    pub refresh_interval_seconds: u64,
    pub websocket_path: String,
    /// Sockets currently registered with the hub
    pub connections: usize,
}

pub fn create_realtime_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/realtime/config", get(realtime_config))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/api/realtime/config",
    tag = "Health",
    responses(
        (status = 200, description = "Polling interval and WebSocket endpoint", body = RealtimeConfigResponse)
    )
)]
pub async fn realtime_config(
    State(state): State<Arc<GatewayState>>,
) -> Json<RealtimeConfigResponse> {
    Json(RealtimeConfigResponse {
        refresh_interval_seconds: state.config.realtime.refresh_interval_seconds,
        websocket_path: "/ws".to_string(),
        connections: state.hub.connection_count().await,
    })
}
