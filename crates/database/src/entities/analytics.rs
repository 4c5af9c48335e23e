//! Daily performance rows recorded per campaign (and optionally per ad)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Analytics {
    pub id: i64,
    pub campaign_id: i64,
    pub ad_id: Option<i64>,
    pub date: String,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub spend: f64,
    pub revenue: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAnalyticsRequest {
    pub campaign_id: i64,
    pub ad_id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub impressions: i64,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub conversions: i64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
}

/// Totals over every analytics row of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AnalyticsSummary {
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub spend: f64,
    pub revenue: f64,
}

impl AnalyticsSummary {
    /// Click-through rate in percent.
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 / self.impressions as f64 * 100.0
        }
    }

    /// Return on ad spend.
    pub fn roas(&self) -> f64 {
        if self.spend == 0.0 {
            0.0
        } else {
            self.revenue / self.spend
        }
    }
}
