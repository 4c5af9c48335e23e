//! Templated ad generation.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::{require, InsightsEngine, InsightsResult, Language};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdGenerationRequest {
    pub platform: String,
    pub product: String,
    pub target_audience: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub campaign_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedAd {
    pub platform: String,
    pub headline: String,
    pub content: String,
    pub call_to_action: String,
    pub hashtags: Vec<String>,
    pub image_url: String,
}

/// Recommended creative size per platform.
pub fn platform_dimensions(platform: &str) -> (u32, u32) {
    match platform.to_ascii_lowercase().as_str() {
        "instagram" => (1080, 1080),
        "facebook" => (1200, 628),
        "x" | "twitter" => (1600, 900),
        "linkedin" => (1200, 627),
        "tiktok" | "snapchat" => (1080, 1920),
        "youtube" => (1280, 720),
        _ => (1200, 628),
    }
}

impl InsightsEngine {
    pub fn generate_ad(&self, request: &AdGenerationRequest) -> InsightsResult<GeneratedAd> {
        require("platform", &request.platform)?;
        require("product", &request.product)?;

        let platform = request.platform.trim();
        let product = request.product.trim();
        let audience = request
            .target_audience
            .as_deref()
            .map(str::trim)
            .filter(|audience| !audience.is_empty());

        let (headline, content, call_to_action) =
            match self.language(request.language.as_deref()) {
                Language::Arabic => {
                    let audience = audience.unwrap_or("جمهورك المستهدف");
                    (
                        format!("اكتشف {product} الآن"),
                        format!(
                            "إعلان ذكي مولّد تلقائيًا لمنصة {platform}: {product} هو الخيار الأمثل لـ{audience}. احصل عليه اليوم واستفد من العرض لفترة محدودة!"
                        ),
                        "تسوق الآن".to_string(),
                    )
                }
                Language::English => {
                    let audience = audience.unwrap_or("your audience");
                    (
                        format!("Discover {product} today"),
                        format!(
                            "Smart ad generated for {platform}: {product} is the perfect choice for {audience}. Get it today while the offer lasts!"
                        ),
                        "Shop now".to_string(),
                    )
                }
            };

        let (width, height) = platform_dimensions(platform);
        let hashtags = vec![
            format!("#{}", product.replace(char::is_whitespace, "_")),
            format!("#{}", platform.to_ascii_lowercase()),
            "#AdPulse".to_string(),
        ];

        debug!(platform, product, "generated templated ad");

        Ok(GeneratedAd {
            platform: platform.to_string(),
            headline,
            content,
            call_to_action,
            hashtags,
            image_url: self.placeholder_image(width, height, "1e40af", "ffffff"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InsightsError;

    fn request(platform: &str, product: &str) -> AdGenerationRequest {
        AdGenerationRequest {
            platform: platform.to_string(),
            product: product.to_string(),
            target_audience: None,
            tone: None,
            language: None,
            campaign_id: None,
        }
    }

    #[test]
    fn arabic_template_names_platform_and_product() {
        let ad = InsightsEngine::default()
            .generate_ad(&request("instagram", "قهوة مختصة"))
            .unwrap();

        assert!(ad.content.starts_with("إعلان ذكي مولّد تلقائيًا لمنصة instagram"));
        assert!(ad.content.contains("قهوة مختصة"));
        assert_eq!(ad.image_url, "https://placehold.co/1080x1080/1e40af/ffffff/png");
        assert_eq!(ad.hashtags[0], "#قهوة_مختصة");
    }

    #[test]
    fn english_template_on_request() {
        let mut english = request("linkedin", "Payroll App");
        english.language = Some("en".to_string());
        english.target_audience = Some("HR managers".to_string());

        let ad = InsightsEngine::default().generate_ad(&english).unwrap();
        assert!(ad.content.contains("for linkedin"));
        assert!(ad.content.contains("HR managers"));
        assert_eq!(ad.call_to_action, "Shop now");
    }

    #[test]
    fn blank_product_is_rejected() {
        let error = InsightsEngine::default()
            .generate_ad(&request("facebook", "  "))
            .unwrap_err();
        assert_eq!(error, InsightsError::MissingField { field: "product" });
    }
}
