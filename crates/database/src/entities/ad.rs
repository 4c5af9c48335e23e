//! Ad entity definitions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Ad {
    pub id: i64,
    pub campaign_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub platform: String,
    pub ad_type: String,
    pub status: AdStatus,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdRequest {
    pub campaign_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub platform: String,
    #[serde(default)]
    pub ad_type: Option<String>,
    #[serde(default)]
    pub status: Option<AdStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub platform: Option<String>,
    pub ad_type: Option<String>,
    pub status: Option<AdStatus>,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub conversions: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Draft,
    Active,
    Paused,
    Rejected,
}
