//! Dashboard aggregate

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Counts and money totals shown on the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DashboardSummary {
    pub total_clients: i64,
    pub total_campaigns: i64,
    pub active_campaigns: i64,
    pub total_posts: i64,
    pub unread_notifications: i64,
    pub total_budget: f64,
    pub total_spent: f64,
    /// Sum of paid invoice totals
    pub total_revenue: f64,
    /// Sum of sent and overdue invoice totals
    pub outstanding_amount: f64,
    pub completed_payments: f64,
}
