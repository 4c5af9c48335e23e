//! Loyalty reward REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use adpulse_database::{CreateRewardRequest, Reward};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PointsResponse {
    pub total_points: i64,
}

/// Create reward routes
pub fn create_reward_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/rewards", get(list_rewards).post(create_reward))
        .route("/rewards/points", get(reward_points))
        .route("/rewards/:id", get(get_reward).delete(delete_reward))
        .route("/rewards/:id/claim", post(claim_reward))
}

#[utoipa::path(
    get,
    path = "/api/rewards",
    tag = "Rewards",
    responses((status = 200, description = "The acting user's rewards", body = Vec<Reward>))
)]
pub async fn list_rewards(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<Vec<Reward>>> {
    Ok(Json(state.rewards.list_for_user(user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/rewards/points",
    tag = "Rewards",
    responses((status = 200, description = "Points from claimed rewards", body = PointsResponse))
)]
pub async fn reward_points(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<PointsResponse>> {
    let total_points = state.rewards.total_points(user.id()).await?;
    Ok(Json(PointsResponse { total_points }))
}

#[utoipa::path(
    get,
    path = "/api/rewards/{id}",
    tag = "Rewards",
    params(("id" = i64, Path, description = "Reward id")),
    responses(
        (status = 200, description = "Reward", body = Reward),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_reward(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Reward>> {
    Ok(Json(state.rewards.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/rewards",
    tag = "Rewards",
    request_body = CreateRewardRequest,
    responses(
        (status = 201, description = "Reward granted to the acting user", body = Reward),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_reward(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateRewardRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .max_len("description", payload.description.as_deref().unwrap_or_default(), TEXT_MAX)
        .optional("reward_type", payload.reward_type.as_deref(), SHORT_MAX)
        .count("points", Some(payload.points))
        .finish()?;

    let reward = state.rewards.create(user.id(), &payload).await?;
    state.publish("rewards", "created", reward.id).await;
    Ok((StatusCode::CREATED, Json(reward)))
}

#[utoipa::path(
    post,
    path = "/api/rewards/{id}/claim",
    tag = "Rewards",
    params(("id" = i64, Path, description = "Reward id")),
    responses(
        (status = 200, description = "Reward claimed", body = Reward),
        (status = 400, description = "Reward is not available", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn claim_reward(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Reward>> {
    let reward = state.rewards.claim(id).await?;
    tracing::info!(reward_id = id, points = reward.points, "reward claimed");
    state.publish("rewards", "claimed", id).await;
    Ok(Json(reward))
}

#[utoipa::path(
    delete,
    path = "/api/rewards/{id}",
    tag = "Rewards",
    params(("id" = i64, Path, description = "Reward id")),
    responses(
        (status = 204, description = "Reward deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_reward(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.rewards.delete(id).await?;
    state.publish("rewards", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
