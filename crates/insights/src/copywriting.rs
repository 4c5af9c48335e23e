//! Templated marketing copy in a handful of tones.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{require, InsightsEngine, InsightsError, InsightsResult, Language};

pub const MAX_VARIANTS: usize = 10;

fn default_variants() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CopywritingRequest {
    pub product: String,
    pub platform: String,
    pub tone: Option<String>,
    pub language: Option<String>,
    #[serde(default = "default_variants")]
    pub variants: usize,
    pub campaign_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CopyVariant {
    pub tone: String,
    pub text: String,
    pub character_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CopywritingResult {
    pub product: String,
    pub platform: String,
    pub variants: Vec<CopyVariant>,
}

const TONES: &[&str] = &["professional", "friendly", "urgent", "luxury", "playful"];

fn render(language: Language, tone: &str, product: &str, platform: &str) -> String {
    match (language, tone) {
        (Language::Arabic, "friendly") => format!("جرّب {product} وشاركنا رأيك على {platform}! 😊"),
        (Language::Arabic, "urgent") => format!("لا تفوّت الفرصة! عرض {product} ينتهي قريبًا، تابعنا على {platform}."),
        (Language::Arabic, "luxury") => format!("{product}: تجربة فاخرة صُممت لمن يبحث عن الأفضل."),
        (Language::Arabic, "playful") => format!("مين قال إن {product} ممل؟ شوف بنفسك على {platform} 🎉"),
        (Language::Arabic, _) => format!("{product} يقدم لك الجودة والاحترافية التي تستحقها. اكتشف المزيد على {platform}."),
        (Language::English, "friendly") => format!("Give {product} a try and tell us what you think on {platform}!"),
        (Language::English, "urgent") => format!("Don't miss out! The {product} offer ends soon. Follow us on {platform}."),
        (Language::English, "luxury") => format!("{product}: a refined experience for those who expect the best."),
        (Language::English, "playful") => format!("Who said {product} was boring? See for yourself on {platform}!"),
        (Language::English, _) => format!("{product} delivers the quality and professionalism you deserve. Learn more on {platform}."),
    }
}

impl InsightsEngine {
    /// Produce `variants` pieces of copy. A requested tone leads, the rest rotate through the built-in tones.
    pub fn generate_copy(&self, request: &CopywritingRequest) -> InsightsResult<CopywritingResult> {
        require("product", &request.product)?;
        require("platform", &request.platform)?;
        if request.variants == 0 || request.variants > MAX_VARIANTS {
            return Err(InsightsError::OutOfRange {
                field: "variants",
                detail: format!("expected 1..={MAX_VARIANTS}, got {}", request.variants),
            });
        }

        let language = self.language(request.language.as_deref());
        let product = request.product.trim();
        let platform = request.platform.trim();

        let mut tones: Vec<String> = Vec::with_capacity(request.variants);
        if let Some(tone) = request.tone.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            tones.push(tone.to_ascii_lowercase());
        }
        for tone in TONES.iter().cycle() {
            if tones.len() >= request.variants {
                break;
            }
            if !tones.iter().any(|existing| existing == tone) || tones.len() >= TONES.len() {
                tones.push((*tone).to_string());
            }
        }

        let variants = tones
            .into_iter()
            .map(|tone| {
                let text = render(language, &tone, product, platform);
                CopyVariant {
                    character_count: text.chars().count(),
                    tone,
                    text,
                }
            })
            .collect();

        Ok(CopywritingResult {
            product: product.to_string(),
            platform: platform.to_string(),
            variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(variants: usize, tone: Option<&str>) -> CopywritingRequest {
        CopywritingRequest {
            product: "Cold Brew".to_string(),
            platform: "instagram".to_string(),
            tone: tone.map(str::to_string),
            language: Some("en".to_string()),
            variants,
            campaign_id: None,
        }
    }

    #[test]
    fn requested_tone_comes_first() {
        let result = InsightsEngine::default()
            .generate_copy(&request(3, Some("Urgent")))
            .unwrap();

        assert_eq!(result.variants.len(), 3);
        assert_eq!(result.variants[0].tone, "urgent");
        assert!(result.variants[0].text.contains("Cold Brew"));
        let tones: Vec<&str> = result.variants.iter().map(|v| v.tone.as_str()).collect();
        assert_eq!(tones, vec!["urgent", "professional", "friendly"]);
    }

    #[test]
    fn more_variants_than_tones_repeats() {
        let result = InsightsEngine::default()
            .generate_copy(&request(7, None))
            .unwrap();
        assert_eq!(result.variants.len(), 7);
        assert!(result
            .variants
            .iter()
            .all(|variant| variant.character_count == variant.text.chars().count()));
    }

    #[test]
    fn variant_count_is_bounded() {
        let engine = InsightsEngine::default();
        assert!(engine.generate_copy(&request(0, None)).is_err());
        assert!(engine.generate_copy(&request(MAX_VARIANTS + 1, None)).is_err());
    }
}
