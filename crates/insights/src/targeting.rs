//! Audience segments and targeting recommendations.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{timestamped_id, InsightsEngine, InsightsError, InsightsResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AudienceSegment {
    pub id: u32,
    pub name: String,
    pub age_range: String,
    pub interests: Vec<String>,
    pub platforms: Vec<String>,
    pub estimated_size: u64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetingRequest {
    pub objective: String,
    pub budget: f64,
    pub platform: Option<String>,
    pub campaign_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetAllocation {
    pub segment_id: u32,
    pub segment_name: String,
    pub share: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TargetingRecommendation {
    pub id: String,
    pub generated_at: String,
    pub objective: String,
    pub campaign_id: Option<i64>,
    pub segments: Vec<AudienceSegment>,
    pub allocations: Vec<BudgetAllocation>,
    pub estimated_reach: u64,
    pub tips: Vec<String>,
}

fn segment(
    id: u32,
    name: &str,
    age_range: &str,
    interests: &[&str],
    platforms: &[&str],
    estimated_size: u64,
    conversion_rate: f64,
) -> AudienceSegment {
    AudienceSegment {
        id,
        name: name.to_string(),
        age_range: age_range.to_string(),
        interests: interests.iter().map(|i| (*i).to_string()).collect(),
        platforms: platforms.iter().map(|p| (*p).to_string()).collect(),
        estimated_size,
        conversion_rate,
    }
}

pub fn sample_segments() -> Vec<AudienceSegment> {
    vec![
        segment(1, "الشباب المهتمون بالتقنية", "18-24", &["gaming", "gadgets"], &["tiktok", "snapchat", "x"], 1_200_000, 2.8),
        segment(2, "Young professionals", "25-34", &["career", "fitness", "coffee"], &["instagram", "linkedin"], 950_000, 3.6),
        segment(3, "Families", "30-45", &["food", "travel", "education"], &["facebook", "instagram", "snapchat"], 1_600_000, 2.1),
        segment(4, "Business decision makers", "35-55", &["b2b", "finance"], &["linkedin", "x"], 310_000, 4.4),
    ]
}

impl InsightsEngine {
    pub fn audience_segments(&self) -> Vec<AudienceSegment> {
        sample_segments()
    }

    /// Pick the segments active on the platform and split the budget by conversion rate.
    pub fn targeting_recommendations(
        &self,
        request: &TargetingRequest,
    ) -> InsightsResult<TargetingRecommendation> {
        crate::require("objective", &request.objective)?;
        if !request.budget.is_finite() || request.budget < 0.0 {
            return Err(InsightsError::OutOfRange {
                field: "budget",
                detail: "must be a non-negative amount".to_string(),
            });
        }

        let mut segments = sample_segments();
        if let Some(platform) = request.platform.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let matching: Vec<AudienceSegment> = segments
                .iter()
                .filter(|s| s.platforms.iter().any(|p| p.eq_ignore_ascii_case(platform)))
                .cloned()
                .collect();
            if !matching.is_empty() {
                segments = matching;
            }
        }
        segments.sort_by(|a, b| b.conversion_rate.total_cmp(&a.conversion_rate));
        segments.truncate(3);

        let weight: f64 = segments.iter().map(|s| s.conversion_rate).sum();
        let allocations = segments
            .iter()
            .map(|s| {
                let share = if weight > 0.0 { s.conversion_rate / weight } else { 0.0 };
                BudgetAllocation {
                    segment_id: s.id,
                    segment_name: s.name.clone(),
                    share: (share * 1000.0).round() / 1000.0,
                    amount: (request.budget * share * 100.0).round() / 100.0,
                }
            })
            .collect();

        let audience: u64 = segments.iter().map(|s| s.estimated_size).sum();
        let reach_ratio = rand::thread_rng().gen_range(0.05..0.15_f64);

        Ok(TargetingRecommendation {
            id: timestamped_id("rec"),
            generated_at: Utc::now().to_rfc3339(),
            objective: request.objective.trim().to_string(),
            campaign_id: request.campaign_id,
            segments,
            allocations,
            estimated_reach: (audience as f64 * reach_ratio) as u64,
            tips: vec![
                "Refresh creatives every two weeks".to_string(),
                "Schedule posts after evening prayers for peak engagement".to_string(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(platform: Option<&str>, budget: f64) -> TargetingRequest {
        TargetingRequest {
            objective: "conversions".to_string(),
            budget,
            platform: platform.map(str::to_string),
            campaign_id: Some(7),
        }
    }

    #[test]
    fn recommendation_id_and_budget_split() {
        let recommendation = InsightsEngine::default()
            .targeting_recommendations(&request(Some("linkedin"), 1000.0))
            .unwrap();

        assert!(recommendation.id.starts_with("rec-"));
        assert_eq!(recommendation.campaign_id, Some(7));
        assert_eq!(recommendation.segments.len(), 2);
        assert_eq!(recommendation.segments[0].id, 4);

        let spent: f64 = recommendation.allocations.iter().map(|a| a.amount).sum();
        assert!((spent - 1000.0).abs() < 0.05);
    }

    #[test]
    fn unknown_platform_uses_every_segment() {
        let recommendation = InsightsEngine::default()
            .targeting_recommendations(&request(Some("myspace"), 300.0))
            .unwrap();
        assert_eq!(recommendation.segments.len(), 3);
        assert!(recommendation.estimated_reach > 0);
    }

    #[test]
    fn negative_budget_is_rejected() {
        assert!(InsightsEngine::default()
            .targeting_recommendations(&request(None, -1.0))
            .is_err());
    }
}
