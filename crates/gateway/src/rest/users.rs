//! User REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use adpulse_database::{CreateUserRequest, UpdateUserRequest, User};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX};

/// Create user routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(current_user))
        .route("/users/:id", get(get_user).put(update_user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<User>))
)]
pub async fn list_users(State(state): State<Arc<GatewayState>>) -> GatewayResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "The acting user", body = User),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn current_user(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<User>> {
    Ok(Json(state.users.get(user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<User>> {
    Ok(Json(state.users.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateUserRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("name", &payload.name, NAME_MAX)
        .required("email", &payload.email, NAME_MAX)
        .email("email", Some(&payload.email))
        .finish()?;

    let user = state.users.create(&payload).await?;
    tracing::info!(user_id = user.id, "user created");
    state.publish("users", "created", user.id).await;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> GatewayResult<Json<User>> {
    Validator::new()
        .optional("name", payload.name.as_deref(), NAME_MAX)
        .email("email", payload.email.as_deref())
        .finish()?;

    let user = state.users.update(id, &payload).await?;
    state.publish("users", "updated", id).await;
    Ok(Json(user))
}
