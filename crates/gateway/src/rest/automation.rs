//! Automation rule REST endpoints.
//!
//! Rules are stored and toggled here; nothing executes them yet.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use adpulse_database::{AutomationRule, CreateAutomationRuleRequest, UpdateAutomationRuleRequest};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX};

/// Create automation rule routes
pub fn create_automation_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/automation/rules", get(list_rules).post(create_rule))
        .route(
            "/automation/rules/:id",
            get(get_rule).put(update_rule).delete(delete_rule),
        )
        .route("/automation/rules/:id/toggle", post(toggle_rule))
}

#[utoipa::path(
    get,
    path = "/api/automation/rules",
    tag = "Automation",
    responses((status = 200, description = "Rules owned by the acting user", body = Vec<AutomationRule>))
)]
pub async fn list_rules(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<Vec<AutomationRule>>> {
    Ok(Json(state.automation.list_for_user(user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/automation/rules/{id}",
    tag = "Automation",
    params(("id" = i64, Path, description = "Rule id")),
    responses(
        (status = 200, description = "Rule", body = AutomationRule),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_rule(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<AutomationRule>> {
    Ok(Json(state.automation.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/automation/rules",
    tag = "Automation",
    request_body = CreateAutomationRuleRequest,
    responses(
        (status = 201, description = "Rule created", body = AutomationRule),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown campaign", body = ErrorResponse)
    )
)]
pub async fn create_rule(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateAutomationRuleRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("name", &payload.name, NAME_MAX)
        .required("trigger_type", &payload.trigger_type, SHORT_MAX)
        .required("action_type", &payload.action_type, SHORT_MAX)
        .finish()?;

    let rule = state.automation.create(user.id(), &payload).await?;
    state.publish("automation", "created", rule.id).await;
    Ok((StatusCode::CREATED, Json(rule)))
}

#[utoipa::path(
    put,
    path = "/api/automation/rules/{id}",
    tag = "Automation",
    params(("id" = i64, Path, description = "Rule id")),
    request_body = UpdateAutomationRuleRequest,
    responses(
        (status = 200, description = "Rule updated", body = AutomationRule),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_rule(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAutomationRuleRequest>,
) -> GatewayResult<Json<AutomationRule>> {
    Validator::new()
        .optional("name", payload.name.as_deref(), NAME_MAX)
        .optional("trigger_type", payload.trigger_type.as_deref(), SHORT_MAX)
        .optional("action_type", payload.action_type.as_deref(), SHORT_MAX)
        .finish()?;

    let rule = state.automation.update(id, &payload).await?;
    state.publish("automation", "updated", id).await;
    Ok(Json(rule))
}

#[utoipa::path(
    post,
    path = "/api/automation/rules/{id}/toggle",
    tag = "Automation",
    params(("id" = i64, Path, description = "Rule id")),
    responses(
        (status = 200, description = "Rule with its active flag flipped", body = AutomationRule),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn toggle_rule(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<AutomationRule>> {
    let rule = state.automation.toggle(id).await?;
    tracing::info!(rule_id = id, active = rule.is_active, "automation rule toggled");
    state.publish("automation", "updated", id).await;
    Ok(Json(rule))
}

#[utoipa::path(
    delete,
    path = "/api/automation/rules/{id}",
    tag = "Automation",
    params(("id" = i64, Path, description = "Rule id")),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_rule(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.automation.delete(id).await?;
    state.publish("automation", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
