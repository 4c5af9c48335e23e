//! REST API endpoints for the gateway

pub mod ads;
pub mod ai;
pub mod automation;
pub mod campaigns;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod insights;
pub mod integrations;
pub mod invoices;
pub mod notifications;
pub mod posts;
pub mod preferences;
pub mod reports;
pub mod rewards;
pub mod seed;
pub mod users;

use axum::{routing::get, Router};
use crate::state::GatewayState;
use std::sync::Arc;

/// Create all REST API routes. Everything except `/health` lives under `/api`.
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_routes())
}

fn create_api_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        // Accounts
        .merge(users::create_user_routes())
        .merge(preferences::create_preference_routes())
        // CRM and campaigns
        .merge(clients::create_client_routes())
        .merge(campaigns::create_campaign_routes())
        .merge(ads::create_ad_routes())
        .merge(posts::create_post_routes())
        // Billing
        .merge(invoices::create_invoice_routes())
        .merge(rewards::create_reward_routes())
        .merge(notifications::create_notification_routes())
        // AI helpers
        .merge(ai::create_ai_routes())
        .merge(insights::create_insight_routes())
        // Tooling
        .merge(integrations::create_integration_routes())
        .merge(reports::create_report_routes())
        .merge(automation::create_automation_routes())
        .merge(dashboard::create_dashboard_routes())
        .merge(seed::create_seed_routes())
        .merge(health::create_realtime_routes())
}
