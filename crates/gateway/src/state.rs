//! Shared application state for the gateway

use sqlx::SqlitePool;

use adpulse_config::AppConfig;
use adpulse_database::{
    AdRepository, AiChatRepository, AnalyticsRepository, AutomationRepository,
    CampaignRepository, ClientRepository, CommentRepository, DashboardRepository,
    GeneratedContentRepository, IntegrationRepository, InvoiceRepository,
    NotificationRepository, PaymentRepository, PostRepository, PreferenceRepository,
    ReportRepository, RewardRepository, UserRepository,
};
use adpulse_insights::InsightsEngine;

use crate::error::{GatewayError, GatewayResult};
use crate::websocket::RealtimeHub;

/// Shared application state containing every repository and service
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    pub config: AppConfig,
    pub users: UserRepository,
    pub clients: ClientRepository,
    pub campaigns: CampaignRepository,
    pub ads: AdRepository,
    pub analytics: AnalyticsRepository,
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub notifications: NotificationRepository,
    pub invoices: InvoiceRepository,
    pub payments: PaymentRepository,
    pub rewards: RewardRepository,
    pub preferences: PreferenceRepository,
    pub ai_chats: AiChatRepository,
    pub generated_content: GeneratedContentRepository,
    pub integrations: IntegrationRepository,
    pub reports: ReportRepository,
    pub automation: AutomationRepository,
    pub dashboard: DashboardRepository,
    /// Template-driven marketing generators
    pub insights: InsightsEngine,
    /// Live WebSocket connections
    pub hub: RealtimeHub,
}

impl GatewayState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let insights = InsightsEngine::from_app_config(&config);
        let hub = RealtimeHub::new(config.realtime.channel_capacity);
        Self::with_services(pool, config, insights, hub)
    }

    /// Build the state around an engine and hub created elsewhere.
    pub fn with_services(
        pool: SqlitePool,
        config: AppConfig,
        insights: InsightsEngine,
        hub: RealtimeHub,
    ) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            campaigns: CampaignRepository::new(pool.clone()),
            ads: AdRepository::new(pool.clone()),
            analytics: AnalyticsRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            invoices: InvoiceRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            rewards: RewardRepository::new(pool.clone()),
            preferences: PreferenceRepository::new(pool.clone()),
            ai_chats: AiChatRepository::new(pool.clone()),
            generated_content: GeneratedContentRepository::new(pool.clone()),
            integrations: IntegrationRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            automation: AutomationRepository::new(pool.clone()),
            dashboard: DashboardRepository::new(pool.clone()),
            pool,
            config,
            insights,
            hub,
        }
    }

    /// Create gateway state from configuration, running migrations first
    pub async fn from_config(config: AppConfig) -> GatewayResult<Self> {
        let pool = adpulse_database::initialize_database(&config.database)
            .await
            .map_err(|e| GatewayError::DatabaseError(format!("Failed to initialize database: {}", e)))?;

        Ok(Self::new(pool, config))
    }

    /// Tell connected dashboards that a record changed.
    pub async fn publish(&self, channel: &str, action: &str, id: i64) {
        let delivered = self.hub.publish_change(channel, action, id).await;
        tracing::debug!(channel, action, id, delivered, "entity change published");
    }
}

/// Gateway state over a fresh in-memory database with the default user in place.
pub async fn create_test_gateway_state() -> GatewayResult<GatewayState> {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = 1;

    let state = GatewayState::from_config(config).await?;
    state
        .users
        .ensure(state.config.auth.default_user_id, "Owner", "owner@adpulse.local")
        .await?;
    Ok(state)
}
