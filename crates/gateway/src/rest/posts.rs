//! Social post and comment REST endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use adpulse_database::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostFilter, PostStatus,
    UpdatePostRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    pub status: Option<PostStatus>,
    pub platform: Option<String>,
}

/// Create post routes
pub fn create_post_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/:id/publish", post(publish_post))
        .route("/posts/:id/comments", get(list_comments).post(create_comment))
        .route("/comments/:id", delete(delete_comment))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    params(ListPostsQuery),
    responses((status = 200, description = "Posts, newest first", body = Vec<Post>))
)]
pub async fn list_posts(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListPostsQuery>,
) -> GatewayResult<Json<Vec<Post>>> {
    let filter = PostFilter {
        status: params.status,
        platform: params.platform,
    };
    Ok(Json(state.posts.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Post>> {
    Ok(Json(state.posts.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created, scheduled when scheduled_at is set", body = Post),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreatePostRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .required("content", &payload.content, TEXT_MAX)
        .required("platform", &payload.platform, SHORT_MAX)
        .date("scheduled_at", payload.scheduled_at.as_deref())
        .finish()?;

    let post = state.posts.create(user.id(), &payload).await?;
    tracing::info!(post_id = post.id, status = ?post.status, "post created");
    state.publish("posts", "created", post.id).await;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> GatewayResult<Json<Post>> {
    Validator::new()
        .optional("title", payload.title.as_deref(), NAME_MAX)
        .optional("content", payload.content.as_deref(), TEXT_MAX)
        .optional("platform", payload.platform.as_deref(), SHORT_MAX)
        .date("scheduled_at", payload.scheduled_at.as_deref())
        .count("likes", payload.likes)
        .count("shares", payload.shares)
        .finish()?;

    let post = state.posts.update(id, &payload).await?;
    state.publish("posts", "updated", id).await;
    Ok(Json(post))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/publish",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post marked published", body = Post),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn publish_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Post>> {
    let post = state.posts.publish(id).await?;
    tracing::info!(post_id = id, platform = %post.platform, "post published");
    state.publish("posts", "published", id).await;
    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post and its comments deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.posts.delete(id).await?;
    state.publish("posts", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments on the post, oldest first", body = Vec<Comment>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Comment>>> {
    state.posts.get(id).await?;
    Ok(Json(state.comments.list_by_post(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<CreateCommentRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("author_name", &payload.author_name, NAME_MAX)
        .required("content", &payload.content, TEXT_MAX)
        .finish()?;

    state.posts.get(id).await?;
    let comment = state.comments.create(id, user.id(), &payload).await?;
    state.publish("comments", "created", comment.id).await;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.comments.delete(id).await?;
    state.publish("comments", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
