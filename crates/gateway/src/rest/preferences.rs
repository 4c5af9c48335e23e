use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use adpulse_database::{UpdatePreferenceRequest, UserPreference};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, SHORT_MAX};

pub fn create_preference_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/preferences", get(get_preferences).put(update_preferences))
}

#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "Preferences",
    responses((status = 200, description = "Preferences of the acting user, defaults when never saved", body = UserPreference))
)]
pub async fn get_preferences(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<UserPreference>> {
    Ok(Json(state.preferences.get_or_default(user.id()).await?))
}

#[utoipa::path(
    put,
    path = "/api/preferences",
    tag = "Preferences",
    request_body = UpdatePreferenceRequest,
    responses(
        (status = 200, description = "Preferences saved", body = UserPreference),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_preferences(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<UpdatePreferenceRequest>,
) -> GatewayResult<Json<UserPreference>> {
    Validator::new()
        .optional("language", payload.language.as_deref(), SHORT_MAX)
        .optional("theme", payload.theme.as_deref(), SHORT_MAX)
        .optional("timezone", payload.timezone.as_deref(), SHORT_MAX)
        .optional("currency", payload.currency.as_deref(), SHORT_MAX)
        .finish()?;

    let preferences = state.preferences.upsert(user.id(), &payload).await?;
    state.publish("preferences", "updated", preferences.id).await;
    Ok(Json(preferences))
}
