//! Marketing "insight" features of the AdPulse dashboard.
//!
//! Nothing in this crate calls a model. Ads, copy and designs are rendered
//! from string templates, and the competitor, trend and audience data are
//! fixed sample datasets with a little random jitter on the numbers.

use chrono::Utc;
use thiserror::Error;

use adpulse_config::{AppConfig, InsightsConfig};

pub mod ads;
pub mod chat;
pub mod competitors;
pub mod copywriting;
pub mod design;
pub mod market;
pub mod targeting;

pub use ads::{AdGenerationRequest, GeneratedAd};
pub use competitors::{Competitor, CompetitorReport, CompetitorReportRequest};
pub use copywriting::{CopyVariant, CopywritingRequest, CopywritingResult};
pub use design::{DesignRequest, GeneratedDesign};
pub use market::{MarketInsight, MarketTrend, TrendDirection};
pub use targeting::{
    AudienceSegment, BudgetAllocation, TargetingRecommendation, TargetingRequest,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightsError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    #[error("{field} is out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },
}

pub type InsightsResult<T> = Result<T, InsightsError>;

/// Supported output languages for the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    /// Anything other than an explicit English code falls back to Arabic.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Language::English,
            _ => Language::Arabic,
        }
    }
}

/// Entry point for every generator, holding the configured defaults.
#[derive(Debug, Clone)]
pub struct InsightsEngine {
    placeholder_base: String,
    default_language: Language,
}

impl InsightsEngine {
    pub fn new(config: &InsightsConfig) -> Self {
        Self {
            placeholder_base: config
                .placeholder_image_base_url
                .trim_end_matches('/')
                .to_string(),
            default_language: Language::parse(&config.default_language),
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(&config.insights)
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub(crate) fn language(&self, requested: Option<&str>) -> Language {
        requested.map(Language::parse).unwrap_or(self.default_language)
    }

    /// Placeholder image URL of the given size.
    pub fn placeholder_image(&self, width: u32, height: u32, background: &str, foreground: &str) -> String {
        format!(
            "{}/{width}x{height}/{}/{}/png",
            self.placeholder_base,
            background.trim_start_matches('#'),
            foreground.trim_start_matches('#'),
        )
    }
}

impl Default for InsightsEngine {
    fn default() -> Self {
        Self::new(&InsightsConfig::default())
    }
}

/// Identifier in the `<prefix>-<unix millis>` shape the dashboard expects.
pub fn timestamped_id(prefix: &str) -> String {
    format!("{prefix}-{}", Utc::now().timestamp_millis())
}

pub(crate) fn require(field: &'static str, value: &str) -> InsightsResult<()> {
    if value.trim().is_empty() {
        return Err(InsightsError::MissingField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_url_uses_configured_base() {
        let engine = InsightsEngine::new(&InsightsConfig {
            placeholder_image_base_url: "https://img.example/".to_string(),
            default_language: "en".to_string(),
        });

        assert_eq!(
            engine.placeholder_image(300, 250, "#1e40af", "ffffff"),
            "https://img.example/300x250/1e40af/ffffff/png"
        );
        assert_eq!(engine.default_language(), Language::English);
    }

    #[test]
    fn timestamped_ids_carry_prefix() {
        let id = timestamped_id("report");
        let millis = id.strip_prefix("report-").unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn unknown_language_falls_back_to_arabic() {
        assert_eq!(Language::parse("fr"), Language::Arabic);
        assert_eq!(Language::parse(" EN "), Language::English);
    }
}
