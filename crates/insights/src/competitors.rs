//! Sample competitor dataset and report builder.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{timestamped_id, InsightsEngine, InsightsError, InsightsResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Competitor {
    pub id: u32,
    pub name: String,
    pub industry: String,
    pub market_share: f64,
    pub monthly_ad_spend: f64,
    pub top_platforms: Vec<String>,
    pub engagement_rate: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CompetitorReportRequest {
    /// Competitors to include. Empty means all of them.
    #[serde(default)]
    pub competitor_ids: Vec<u32>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetitorReport {
    pub id: String,
    pub generated_at: String,
    pub competitors: Vec<Competitor>,
    pub average_engagement_rate: f64,
    pub estimated_share_of_voice: f64,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn competitor(
    id: u32,
    name: &str,
    industry: &str,
    market_share: f64,
    monthly_ad_spend: f64,
    top_platforms: &[&str],
    engagement_rate: f64,
    strengths: &[&str],
    weaknesses: &[&str],
) -> Competitor {
    Competitor {
        id,
        name: name.to_string(),
        industry: industry.to_string(),
        market_share,
        monthly_ad_spend,
        top_platforms: owned(top_platforms),
        engagement_rate,
        strengths: owned(strengths),
        weaknesses: owned(weaknesses),
    }
}

/// The fixed competitor list shown on the analysis page.
pub fn sample_competitors() -> Vec<Competitor> {
    vec![
        competitor(
            1,
            "شركة الإبداع الرقمي",
            "marketing",
            18.5,
            45_000.0,
            &["instagram", "snapchat"],
            4.2,
            &["محتوى مرئي قوي", "تفاعل عالٍ مع الجمهور"],
            &["ضعف في LinkedIn"],
        ),
        competitor(
            2,
            "Gulf Media Group",
            "marketing",
            24.0,
            80_000.0,
            &["facebook", "youtube", "x"],
            2.9,
            &["Large budget", "Regional reach"],
            &["Slow creative turnaround"],
        ),
        competitor(
            3,
            "Riyadh Retail Co.",
            "retail",
            12.3,
            30_000.0,
            &["instagram", "tiktok"],
            5.1,
            &["Influencer partnerships"],
            &["Inconsistent posting"],
        ),
        competitor(
            4,
            "TechNova",
            "technology",
            9.8,
            22_000.0,
            &["linkedin", "x"],
            3.4,
            &["Thought leadership"],
            &["Little video content"],
        ),
    ]
}

impl InsightsEngine {
    pub fn competitors(&self, industry: Option<&str>) -> Vec<Competitor> {
        let mut competitors = sample_competitors();
        if let Some(industry) = industry.map(str::trim).filter(|i| !i.is_empty()) {
            competitors.retain(|c| c.industry.eq_ignore_ascii_case(industry));
        }
        competitors
    }

    /// Build a report over the selected competitors with a `report-<millis>` id.
    pub fn competitor_report(
        &self,
        request: &CompetitorReportRequest,
    ) -> InsightsResult<CompetitorReport> {
        let mut competitors = self.competitors(request.industry.as_deref());
        if !request.competitor_ids.is_empty() {
            competitors.retain(|c| request.competitor_ids.contains(&c.id));
        }
        if competitors.is_empty() {
            return Err(InsightsError::OutOfRange {
                field: "competitor_ids",
                detail: "no competitor matches the selection".to_string(),
            });
        }

        let average_engagement_rate =
            competitors.iter().map(|c| c.engagement_rate).sum::<f64>() / competitors.len() as f64;
        let mut rng = rand::thread_rng();
        let estimated_share_of_voice = (rng.gen_range(8.0..22.0_f64) * 10.0).round() / 10.0;

        let opportunities = competitors
            .iter()
            .flat_map(|c| c.weaknesses.iter())
            .map(|weakness| format!("Exploit competitor gap: {weakness}"))
            .collect();

        Ok(CompetitorReport {
            id: timestamped_id("report"),
            generated_at: Utc::now().to_rfc3339(),
            competitors,
            average_engagement_rate: (average_engagement_rate * 100.0).round() / 100.0,
            estimated_share_of_voice,
            opportunities,
            recommendations: vec![
                "Increase short-form video output".to_string(),
                "Test carousel ads on Instagram".to_string(),
                "Publish weekly thought-leadership posts on LinkedIn".to_string(),
            ],
        })
    }
}
