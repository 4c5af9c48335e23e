//! Notification REST endpoints, scoped to the acting user

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use adpulse_database::{CreateNotificationRequest, Notification};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// Create notification routes
pub fn create_notification_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/notifications", get(list_notifications).post(create_notification))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id", get(get_notification).delete(delete_notification))
        .route("/notifications/:id/read", post(mark_read))
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(ListNotificationsQuery),
    responses((status = 200, description = "The acting user's notifications, newest first", body = Vec<Notification>))
)]
pub async fn list_notifications(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Query(params): Query<ListNotificationsQuery>,
) -> GatewayResult<Json<Vec<Notification>>> {
    Ok(Json(
        state
            .notifications
            .list_for_user(user.id(), params.unread_only)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notifications",
    responses((status = 200, description = "Unread notifications for the acting user", body = UnreadCountResponse))
)]
pub async fn unread_count(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<UnreadCountResponse>> {
    let count = state.notifications.unread_count(user.id()).await?;
    Ok(Json(UnreadCountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification", body = Notification),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_notification(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Notification>> {
    Ok(Json(state.notifications.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created for the acting user", body = Notification),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_notification(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateNotificationRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .required("message", &payload.message, TEXT_MAX)
        .finish()?;

    let notification = state.notifications.create(user.id(), &payload).await?;
    state.publish("notifications", "created", notification.id).await;
    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn mark_read(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Notification>> {
    let notification = state.notifications.mark_read(id).await?;
    state.publish("notifications", "updated", id).await;
    Ok(Json(notification))
}

#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses((status = 200, description = "Number of notifications marked read", body = MarkAllReadResponse))
)]
pub async fn mark_all_read(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<MarkAllReadResponse>> {
    let updated = state.notifications.mark_all_read(user.id()).await?;
    tracing::debug!(user_id = user.id(), updated, "notifications marked read");
    if updated > 0 {
        state.publish("notifications", "read_all", user.id()).await;
    }
    Ok(Json(MarkAllReadResponse { updated }))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_notification(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.notifications.delete(id).await?;
    state.publish("notifications", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
