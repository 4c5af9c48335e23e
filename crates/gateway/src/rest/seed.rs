//! Demo data endpoints. Both routes wipe every table before loading fixtures.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use adpulse_database::SeedMode;

use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Row count per table after seeding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<BTreeMap<String, i64>>,
}

pub fn create_seed_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/seed", post(seed_basic))
        .route("/seed-advanced", post(seed_advanced))
}

#[utoipa::path(
    post,
    path = "/api/seed",
    tag = "Seed",
    responses(
        (status = 200, description = "Basic fixtures loaded", body = SeedResponse),
        (status = 500, description = "Seeding failed", body = SeedResponse)
    )
)]
pub async fn seed_basic(State(state): State<Arc<GatewayState>>) -> Response {
    run_seed(&state, SeedMode::Basic).await
}

#[utoipa::path(
    post,
    path = "/api/seed-advanced",
    tag = "Seed",
    responses(
        (status = 200, description = "Full fixtures loaded", body = SeedResponse),
        (status = 500, description = "Seeding failed", body = SeedResponse)
    )
)]
pub async fn seed_advanced(State(state): State<Arc<GatewayState>>) -> Response {
    run_seed(&state, SeedMode::Advanced).await
}

async fn run_seed(state: &GatewayState, mode: SeedMode) -> Response {
    match adpulse_database::seed(&state.pool, mode).await {
        Ok(report) => {
            state.publish("seed", "completed", report.total_rows()).await;
            Json(SeedResponse {
                success: true,
                message: format!("Database seeded with {} rows", report.total_rows()),
                error: None,
                counts: Some(report.counts),
            })
            .into_response()
        }
        Err(err) => {
            tracing::error!(?mode, error = %err, "seeding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SeedResponse {
                    success: false,
                    message: "Failed to seed database".to_string(),
                    error: Some(err.to_string()),
                    counts: None,
                }),
            )
                .into_response()
        }
    }
}
