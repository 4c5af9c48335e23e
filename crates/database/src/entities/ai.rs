//! Assistant chat history and stored generator output

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AiChat {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AiChatMessage {
    pub id: i64,
    pub chat_id: i64,
    pub role: ChatRole,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiChatWithMessages {
    #[serde(flatten)]
    pub chat: AiChat,
    pub messages: Vec<AiChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAiChatRequest {
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AiGeneratedContent {
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: Option<i64>,
    pub content_type: GeneratedContentType,
    pub platform: Option<String>,
    pub prompt: String,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Json<serde_json::Value>>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGeneratedContentRequest {
    pub campaign_id: Option<i64>,
    pub content_type: GeneratedContentType,
    pub platform: Option<String>,
    pub prompt: String,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GeneratedContentType {
    Ad,
    Copy,
    Design,
    Report,
    Recommendation,
}
