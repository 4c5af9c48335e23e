//! Sample market trend dataset.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::InsightsEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketTrend {
    pub id: u32,
    pub industry: String,
    pub title: String,
    pub description: String,
    pub growth_rate: f64,
    pub direction: TrendDirection,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketInsight {
    pub title: String,
    pub summary: String,
    pub impact: String,
    pub confidence: f64,
}

fn trend(
    id: u32,
    industry: &str,
    title: &str,
    description: &str,
    growth_rate: f64,
    platforms: &[&str],
) -> MarketTrend {
    let direction = if growth_rate > 1.0 {
        TrendDirection::Up
    } else if growth_rate < -1.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };
    MarketTrend {
        id,
        industry: industry.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        growth_rate,
        direction,
        platforms: platforms.iter().map(|p| (*p).to_string()).collect(),
    }
}

pub fn sample_trends() -> Vec<MarketTrend> {
    vec![
        trend(1, "retail", "التسوق عبر الفيديو القصير", "نمو المبيعات القادمة من مقاطع الفيديو القصيرة", 34.5, &["tiktok", "instagram"]),
        trend(2, "food", "Delivery app promotions", "Restaurants shifting budget to delivery platforms", 12.0, &["snapchat", "instagram"]),
        trend(3, "technology", "B2B thought leadership", "Decision makers engage with long-form posts", 8.7, &["linkedin"]),
        trend(4, "retail", "Print catalogues", "Printed catalogues keep losing reach", -15.2, &[]),
        trend(5, "marketing", "Influencer micro-campaigns", "Smaller creators deliver better engagement per riyal", 21.3, &["instagram", "tiktok", "snapchat"]),
        trend(6, "technology", "Display banner ads", "Banner performance is flat year over year", 0.4, &["google"]),
    ]
}

impl InsightsEngine {
    /// Trends sorted by growth, optionally limited to one industry.
    pub fn market_trends(&self, industry: Option<&str>) -> Vec<MarketTrend> {
        let mut trends = sample_trends();
        if let Some(industry) = industry.map(str::trim).filter(|i| !i.is_empty()) {
            trends.retain(|t| t.industry.eq_ignore_ascii_case(industry));
        }
        trends.sort_by(|a, b| b.growth_rate.total_cmp(&a.growth_rate));
        trends
    }

    pub fn market_insights(&self) -> Vec<MarketInsight> {
        let trends = self.market_trends(None);
        let rising = trends.iter().filter(|t| t.direction == TrendDirection::Up).count();

        let mut insights = vec![MarketInsight {
            title: "Overall momentum".to_string(),
            summary: format!("{rising} of {} tracked trends are growing", trends.len()),
            impact: "medium".to_string(),
            confidence: 0.7,
        }];

        if let Some(top) = trends.first() {
            insights.push(MarketInsight {
                title: format!("Fastest growing: {}", top.title),
                summary: format!(
                    "{} is growing {:.1}% in {}",
                    top.title, top.growth_rate, top.industry
                ),
                impact: "high".to_string(),
                confidence: 0.8,
            });
        }

        if let Some(worst) = trends.last().filter(|t| t.direction == TrendDirection::Down) {
            insights.push(MarketInsight {
                title: format!("Declining: {}", worst.title),
                summary: format!("Consider moving budget away from {}", worst.title.to_lowercase()),
                impact: "medium".to_string(),
                confidence: 0.65,
            });
        }

        insights
    }
}
