//! Social-media account connections.
//!
//! Access tokens are accepted on connect and update but never serialized back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use adpulse_database::{
    CreateIntegrationRequest, SocialMediaIntegration, UpdateIntegrationRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

/// Create integration routes
pub fn create_integration_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/integrations", get(list_integrations).post(connect_integration))
        .route(
            "/integrations/:id",
            get(get_integration)
                .put(update_integration)
                .delete(delete_integration),
        )
        .route("/integrations/:id/disconnect", post(disconnect_integration))
}

#[utoipa::path(
    get,
    path = "/api/integrations",
    tag = "Integrations",
    responses((status = 200, description = "Accounts connected by the acting user", body = Vec<SocialMediaIntegration>))
)]
pub async fn list_integrations(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<Vec<SocialMediaIntegration>>> {
    Ok(Json(state.integrations.list_for_user(user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/integrations/{id}",
    tag = "Integrations",
    params(("id" = i64, Path, description = "Integration id")),
    responses(
        (status = 200, description = "Integration", body = SocialMediaIntegration),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_integration(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<SocialMediaIntegration>> {
    Ok(Json(state.integrations.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/integrations",
    tag = "Integrations",
    request_body = CreateIntegrationRequest,
    responses(
        (status = 201, description = "Account connected", body = SocialMediaIntegration),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn connect_integration(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateIntegrationRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("platform", &payload.platform, SHORT_MAX)
        .required("account_name", &payload.account_name, NAME_MAX)
        .optional("account_id", payload.account_id.as_deref(), NAME_MAX)
        .max_len(
            "access_token",
            payload.access_token.as_deref().unwrap_or_default(),
            TEXT_MAX,
        )
        .finish()?;

    let integration = state.integrations.create(user.id(), &payload).await?;
    tracing::info!(
        integration_id = integration.id,
        platform = %integration.platform,
        "integration connected"
    );
    state.publish("integrations", "created", integration.id).await;
    Ok((StatusCode::CREATED, Json(integration)))
}

#[utoipa::path(
    put,
    path = "/api/integrations/{id}",
    tag = "Integrations",
    params(("id" = i64, Path, description = "Integration id")),
    request_body = UpdateIntegrationRequest,
    responses(
        (status = 200, description = "Integration updated", body = SocialMediaIntegration),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_integration(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateIntegrationRequest>,
) -> GatewayResult<Json<SocialMediaIntegration>> {
    Validator::new()
        .optional("account_name", payload.account_name.as_deref(), NAME_MAX)
        .optional("account_id", payload.account_id.as_deref(), NAME_MAX)
        .finish()?;

    let integration = state.integrations.update(id, &payload).await?;
    state.publish("integrations", "updated", id).await;
    Ok(Json(integration))
}

#[utoipa::path(
    post,
    path = "/api/integrations/{id}/disconnect",
    tag = "Integrations",
    params(("id" = i64, Path, description = "Integration id")),
    responses(
        (status = 200, description = "Account disconnected and token dropped", body = SocialMediaIntegration),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn disconnect_integration(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<SocialMediaIntegration>> {
    let integration = state.integrations.disconnect(id).await?;
    tracing::info!(integration_id = id, "integration disconnected");
    state.publish("integrations", "disconnected", id).await;
    Ok(Json(integration))
}

#[utoipa::path(
    delete,
    path = "/api/integrations/{id}",
    tag = "Integrations",
    params(("id" = i64, Path, description = "Integration id")),
    responses(
        (status = 204, description = "Integration removed"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_integration(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.integrations.delete(id).await?;
    state.publish("integrations", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
