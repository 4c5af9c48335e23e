//! Saved reports

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: Option<i64>,
    pub title: String,
    pub report_type: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<Json<serde_json::Value>>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    pub campaign_id: Option<i64>,
    pub title: String,
    pub report_type: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}
