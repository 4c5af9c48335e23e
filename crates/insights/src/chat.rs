//! Canned assistant replies for the AI chat screen.

use crate::{InsightsEngine, Language};

impl InsightsEngine {
    /// Reply to a user message by keyword. The reply language follows the engine default.
    pub fn chat_reply(&self, message: &str) -> String {
        let lowered = message.to_lowercase();
        let topic = if ["budget", "ميزانية", "spend"].iter().any(|k| lowered.contains(k)) {
            Topic::Budget
        } else if ["audience", "جمهور", "target", "استهداف"].iter().any(|k| lowered.contains(k)) {
            Topic::Audience
        } else if ["content", "محتوى", "post", "منشور"].iter().any(|k| lowered.contains(k)) {
            Topic::Content
        } else {
            Topic::General
        };

        match (self.default_language(), topic) {
            (Language::Arabic, Topic::Budget) => "أنصح بتخصيص 60٪ من الميزانية للحملات الأعلى تحويلاً ومراجعة الإنفاق أسبوعياً.".to_string(),
            (Language::Arabic, Topic::Audience) => "ركّز على شريحة 25-34 عاماً على إنستغرام، فهي الأعلى تفاعلاً حالياً.".to_string(),
            (Language::Arabic, Topic::Content) => "جرّب نشر مقاطع فيديو قصيرة ثلاث مرات أسبوعياً مع دعوة واضحة لاتخاذ إجراء.".to_string(),
            (Language::Arabic, Topic::General) => format!("شكراً لسؤالك حول \"{}\". سأقترح عليك خطوات عملية لتحسين أداء حملاتك.", message.trim()),
            (Language::English, Topic::Budget) => "Put about 60% of the budget behind your best converting campaigns and review spend weekly.".to_string(),
            (Language::English, Topic::Audience) => "Focus on the 25-34 segment on Instagram; it currently engages the most.".to_string(),
            (Language::English, Topic::Content) => "Try short videos three times a week with a clear call to action.".to_string(),
            (Language::English, Topic::General) => format!("Thanks for asking about \"{}\". Here are practical steps to improve your campaigns.", message.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Topic {
    Budget,
    Audience,
    Content,
    General,
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpulse_config::InsightsConfig;

    #[test]
    fn keyword_selects_reply() {
        let engine = InsightsEngine::default();
        assert!(engine.chat_reply("كم الميزانية المناسبة؟").contains("الميزانية"));
    }

    #[test]
    fn general_reply_echoes_message() {
        let engine = InsightsEngine::new(&InsightsConfig {
            default_language: "en".to_string(),
            ..Default::default()
        });
        let reply = engine.chat_reply("  hello there ");
        assert!(reply.contains("\"hello there\""));
    }
}
