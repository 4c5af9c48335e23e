//! # AdPulse Gateway Crate
//!
//! This crate provides the API gateway layer for AdPulse: the REST procedures
//! behind the marketing dashboard and the WebSocket hub that tells open
//! dashboards when data changed.
//!
//! ## Architecture
//!
//! - **REST**: one module per entity group, mounted under `/api`, with OpenAPI documentation
//! - **WebSocket**: `/ws` endpoint backed by an in-memory connection registry
//! - **State**: repositories, the insights engine and the hub, shared behind an `Arc`
//! - **Middleware**: acting-user extraction, CORS and request logging
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adpulse_config::AppConfig;
//! use adpulse_gateway::{create_router, GatewayState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let state = GatewayState::from_config(config).await?;
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod validation;
pub mod websocket;

// Re-export main types for convenience
pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use middleware::{CurrentUser, USER_ID_HEADER};
pub use state::{create_test_gateway_state, GatewayState};
pub use websocket::{ClientEvent, RealtimeHub, ServerEvent};

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "AdPulse API", description = "Marketing ERP backend"),
    paths(
        rest::health::health_check,
        rest::health::realtime_config,
        rest::users::list_users,
        rest::users::current_user,
        rest::users::get_user,
        rest::users::create_user,
        rest::users::update_user,
        rest::preferences::get_preferences,
        rest::preferences::update_preferences,
        rest::clients::list_clients,
        rest::clients::get_client,
        rest::clients::create_client,
        rest::clients::update_client,
        rest::clients::delete_client,
        rest::clients::list_client_campaigns,
        rest::clients::list_client_invoices,
        rest::campaigns::list_campaigns,
        rest::campaigns::campaign_stats,
        rest::campaigns::get_campaign,
        rest::campaigns::create_campaign,
        rest::campaigns::update_campaign,
        rest::campaigns::archive_campaign,
        rest::campaigns::delete_campaign,
        rest::campaigns::list_campaign_ads,
        rest::campaigns::list_campaign_analytics,
        rest::campaigns::campaign_analytics_summary,
        rest::ads::list_ads,
        rest::ads::get_ad,
        rest::ads::create_ad,
        rest::ads::update_ad,
        rest::ads::delete_ad,
        rest::ads::list_analytics,
        rest::ads::analytics_summary,
        rest::ads::get_analytics,
        rest::ads::create_analytics,
        rest::ads::delete_analytics,
        rest::posts::list_posts,
        rest::posts::get_post,
        rest::posts::create_post,
        rest::posts::update_post,
        rest::posts::publish_post,
        rest::posts::delete_post,
        rest::posts::list_comments,
        rest::posts::create_comment,
        rest::posts::delete_comment,
        rest::notifications::list_notifications,
        rest::notifications::unread_count,
        rest::notifications::get_notification,
        rest::notifications::create_notification,
        rest::notifications::mark_read,
        rest::notifications::mark_all_read,
        rest::notifications::delete_notification,
        rest::invoices::list_invoices,
        rest::invoices::get_invoice,
        rest::invoices::create_invoice,
        rest::invoices::update_invoice,
        rest::invoices::delete_invoice,
        rest::invoices::list_invoice_payments,
        rest::invoices::list_payments,
        rest::invoices::get_payment,
        rest::invoices::create_payment,
        rest::invoices::update_payment,
        rest::invoices::delete_payment,
        rest::rewards::list_rewards,
        rest::rewards::reward_points,
        rest::rewards::get_reward,
        rest::rewards::create_reward,
        rest::rewards::claim_reward,
        rest::rewards::delete_reward,
        rest::ai::list_chats,
        rest::ai::create_chat,
        rest::ai::get_chat,
        rest::ai::delete_chat,
        rest::ai::send_message,
        rest::ai::list_content,
        rest::ai::get_content,
        rest::ai::delete_content,
        rest::ai::generate_ad,
        rest::ai::generate_copy,
        rest::ai::create_design,
        rest::insights::list_competitors,
        rest::insights::competitor_report,
        rest::insights::market_trends,
        rest::insights::market_insights,
        rest::insights::audience_segments,
        rest::insights::targeting_recommendations,
        rest::integrations::list_integrations,
        rest::integrations::get_integration,
        rest::integrations::connect_integration,
        rest::integrations::update_integration,
        rest::integrations::disconnect_integration,
        rest::integrations::delete_integration,
        rest::reports::list_reports,
        rest::reports::get_report,
        rest::reports::create_report,
        rest::reports::delete_report,
        rest::automation::list_rules,
        rest::automation::get_rule,
        rest::automation::create_rule,
        rest::automation::update_rule,
        rest::automation::toggle_rule,
        rest::automation::delete_rule,
        rest::dashboard::dashboard_summary,
        rest::seed::seed_basic,
        rest::seed::seed_advanced,
    ),
    components(
        schemas(
            ErrorResponse,
            rest::health::HealthResponse,
            rest::health::RealtimeConfigResponse,
            rest::notifications::UnreadCountResponse,
            rest::notifications::MarkAllReadResponse,
            rest::rewards::PointsResponse,
            rest::ai::SendMessageRequest,
            rest::ai::ChatExchange,
            rest::ai::GeneratedAdResponse,
            rest::ai::CopywritingResponse,
            rest::ai::DesignResponse,
            rest::seed::SeedResponse,
            adpulse_database::User,
            adpulse_database::UserRole,
            adpulse_database::CreateUserRequest,
            adpulse_database::UpdateUserRequest,
            adpulse_database::UserPreference,
            adpulse_database::UpdatePreferenceRequest,
            adpulse_database::Client,
            adpulse_database::ClientStatus,
            adpulse_database::CreateClientRequest,
            adpulse_database::UpdateClientRequest,
            adpulse_database::Campaign,
            adpulse_database::CampaignStatus,
            adpulse_database::CampaignStats,
            adpulse_database::CreateCampaignRequest,
            adpulse_database::UpdateCampaignRequest,
            adpulse_database::Ad,
            adpulse_database::AdStatus,
            adpulse_database::CreateAdRequest,
            adpulse_database::UpdateAdRequest,
            adpulse_database::Analytics,
            adpulse_database::AnalyticsSummary,
            adpulse_database::CreateAnalyticsRequest,
            adpulse_database::Post,
            adpulse_database::PostStatus,
            adpulse_database::CreatePostRequest,
            adpulse_database::UpdatePostRequest,
            adpulse_database::Comment,
            adpulse_database::CreateCommentRequest,
            adpulse_database::Notification,
            adpulse_database::NotificationType,
            adpulse_database::CreateNotificationRequest,
            adpulse_database::Invoice,
            adpulse_database::InvoiceItem,
            adpulse_database::InvoiceStatus,
            adpulse_database::InvoiceWithItems,
            adpulse_database::CreateInvoiceRequest,
            adpulse_database::CreateInvoiceItemRequest,
            adpulse_database::UpdateInvoiceRequest,
            adpulse_database::Payment,
            adpulse_database::PaymentStatus,
            adpulse_database::CreatePaymentRequest,
            adpulse_database::UpdatePaymentRequest,
            adpulse_database::Reward,
            adpulse_database::RewardStatus,
            adpulse_database::CreateRewardRequest,
            adpulse_database::AiChat,
            adpulse_database::AiChatMessage,
            adpulse_database::AiChatWithMessages,
            adpulse_database::ChatRole,
            adpulse_database::CreateAiChatRequest,
            adpulse_database::AiGeneratedContent,
            adpulse_database::GeneratedContentType,
            adpulse_database::SocialMediaIntegration,
            adpulse_database::CreateIntegrationRequest,
            adpulse_database::UpdateIntegrationRequest,
            adpulse_database::Report,
            adpulse_database::CreateReportRequest,
            adpulse_database::AutomationRule,
            adpulse_database::CreateAutomationRuleRequest,
            adpulse_database::UpdateAutomationRuleRequest,
            adpulse_database::DashboardSummary,
            adpulse_insights::AdGenerationRequest,
            adpulse_insights::GeneratedAd,
            adpulse_insights::CopywritingRequest,
            adpulse_insights::CopywritingResult,
            adpulse_insights::CopyVariant,
            adpulse_insights::DesignRequest,
            adpulse_insights::GeneratedDesign,
            adpulse_insights::Competitor,
            adpulse_insights::CompetitorReportRequest,
            adpulse_insights::CompetitorReport,
            adpulse_insights::MarketTrend,
            adpulse_insights::MarketInsight,
            adpulse_insights::TrendDirection,
            adpulse_insights::AudienceSegment,
            adpulse_insights::TargetingRequest,
            adpulse_insights::TargetingRecommendation,
            adpulse_insights::BudgetAllocation,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and realtime settings"),
        (name = "Users", description = "Team members"),
        (name = "Preferences", description = "Per-user settings"),
        (name = "Clients", description = "Customer records"),
        (name = "Campaigns", description = "Campaign management"),
        (name = "Ads", description = "Ads inside campaigns"),
        (name = "Analytics", description = "Daily performance rows"),
        (name = "Posts", description = "Social posts and comments"),
        (name = "Notifications", description = "In-app notifications"),
        (name = "Invoices", description = "Billing"),
        (name = "Payments", description = "Payments against invoices"),
        (name = "Rewards", description = "Loyalty points"),
        (name = "AI", description = "Assistant chat and templated generators"),
        (name = "Market intelligence", description = "Competitors, trends and targeting"),
        (name = "Integrations", description = "Connected social accounts"),
        (name = "Reports", description = "Saved reports"),
        (name = "Automation", description = "Automation rules"),
        (name = "Dashboard", description = "Landing page aggregates"),
        (name = "Seed", description = "Demo data"),
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    Router::new()
        // REST API routes
        .merge(rest::create_rest_routes().with_state(arc_state.clone()))
        // WebSocket routes
        .merge(websocket::create_websocket_routes().with_state(arc_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::create_cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_api_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/campaigns/{id}/archive"));
        assert!(doc.paths.paths.contains_key("/api/ai/targeting/recommendations"));
    }
}
