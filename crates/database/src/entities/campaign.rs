//! Campaign entity definitions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Campaign {
    pub id: i64,
    pub user_id: i64,
    pub client_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub platform: String,
    pub objective: Option<String>,
    pub budget: f64,
    pub spent: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_audience: Option<String>,
    pub is_archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub client_id: Option<i64>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    pub platform: String,
    pub objective: Option<String>,
    #[serde(default)]
    pub budget: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub client_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<CampaignStatus>,
    pub platform: Option<String>,
    pub objective: Option<String>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_audience: Option<String>,
}

/// Filters accepted by the campaign listing.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub status: Option<CampaignStatus>,
    pub client_id: Option<i64>,
    pub include_archived: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

/// Aggregate figures shown on the campaigns page header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CampaignStats {
    pub total: i64,
    pub active: i64,
    pub paused: i64,
    pub completed: i64,
    pub total_budget: f64,
    pub total_spent: f64,
}
