//! Connected social-media accounts

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SocialMediaIntegration {
    pub id: i64,
    pub user_id: i64,
    pub platform: String,
    pub account_name: String,
    pub account_id: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub is_connected: bool,
    pub connected_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateIntegrationRequest {
    pub platform: String,
    pub account_name: String,
    pub account_id: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateIntegrationRequest {
    pub account_name: Option<String>,
    pub account_id: Option<String>,
    pub access_token: Option<String>,
    pub is_connected: Option<bool>,
}
