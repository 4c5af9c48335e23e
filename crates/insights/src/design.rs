//! Placeholder design generation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{require, InsightsEngine, InsightsError, InsightsResult};

pub const MAX_DIMENSION: u32 = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DesignRequest {
    pub title: String,
    pub platform: Option<String>,
    pub width: u32,
    pub height: u32,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub campaign_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedDesign {
    pub title: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

fn hex_color(value: Option<&str>, fallback: &'static str) -> InsightsResult<String> {
    let Some(value) = value else {
        return Ok(fallback.to_string());
    };
    let color = value.trim().trim_start_matches('#');
    let valid = matches!(color.len(), 3 | 6) && color.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(InsightsError::OutOfRange {
            field: "color",
            detail: format!("{value} is not a hex color"),
        });
    }
    Ok(color.to_ascii_lowercase())
}

impl InsightsEngine {
    pub fn create_design(&self, request: &DesignRequest) -> InsightsResult<GeneratedDesign> {
        require("title", &request.title)?;
        for (field, value) in [("width", request.width), ("height", request.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(InsightsError::OutOfRange {
                    field,
                    detail: format!("expected 1..={MAX_DIMENSION}, got {value}"),
                });
            }
        }

        let background = hex_color(request.background_color.as_deref(), "e2e8f0")?;
        let foreground = hex_color(request.text_color.as_deref(), "1e293b")?;

        Ok(GeneratedDesign {
            title: request.title.trim().to_string(),
            image_url: self.placeholder_image(request.width, request.height, &background, &foreground),
            width: request.width,
            height: request.height,
            format: "png".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(width: u32, height: u32) -> DesignRequest {
        DesignRequest {
            title: "Eid banner".to_string(),
            platform: Some("instagram".to_string()),
            width,
            height,
            background_color: Some("#FFAA00".to_string()),
            text_color: None,
            campaign_id: None,
        }
    }

    #[test]
    fn url_matches_requested_size() {
        let design = InsightsEngine::default().create_design(&request(1080, 1350)).unwrap();
        assert_eq!(design.image_url, "https://placehold.co/1080x1350/ffaa00/1e293b/png");
        assert_eq!((design.width, design.height), (1080, 1350));
    }

    #[test]
    fn zero_or_huge_dimensions_are_rejected() {
        let engine = InsightsEngine::default();
        assert!(engine.create_design(&request(0, 100)).is_err());
        assert!(engine.create_design(&request(100, MAX_DIMENSION + 1)).is_err());
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut bad = request(100, 100);
        bad.background_color = Some("orange".to_string());
        let error = InsightsEngine::default().create_design(&bad).unwrap_err();
        assert!(matches!(error, InsightsError::OutOfRange { field: "color", .. }));
    }
}
