//! Social post and comment entity definitions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub media_url: Option<String>,
    pub status: PostStatus,
    pub scheduled_at: Option<String>,
    pub published_at: Option<String>,
    pub likes: i64,
    pub shares: i64,
    pub comments_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub campaign_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub media_url: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub campaign_id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub platform: Option<String>,
    pub media_url: Option<String>,
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<String>,
    pub likes: Option<i64>,
    pub shares: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub author_name: String,
    pub content: String,
}
