//! Automation rule entity definitions

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AutomationRule {
    pub id: i64,
    pub user_id: i64,
    pub campaign_id: Option<i64>,
    pub name: String,
    pub trigger_type: String,
    pub action_type: String,
    #[schema(value_type = Option<Object>)]
    pub config: Option<Json<serde_json::Value>>,
    pub is_active: bool,
    pub last_run_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAutomationRuleRequest {
    pub campaign_id: Option<i64>,
    pub name: String,
    pub trigger_type: String,
    pub action_type: String,
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAutomationRuleRequest {
    pub campaign_id: Option<i64>,
    pub name: Option<String>,
    pub trigger_type: Option<String>,
    pub action_type: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub config: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}
