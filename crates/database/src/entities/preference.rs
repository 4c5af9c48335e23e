//! Per-user dashboard preferences

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct UserPreference {
    pub id: i64,
    pub user_id: i64,
    pub language: String,
    pub theme: String,
    pub timezone: String,
    pub currency: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePreferenceRequest {
    pub language: Option<String>,
    pub theme: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
}
