use anyhow::{Context, Result};
use adpulse_config::AppConfig;
use adpulse_database::{initialize_database, User, UserRepository};
use adpulse_insights::InsightsEngine;
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Name and e-mail given to the fallback user when the database has none.
const OWNER_NAME: &str = "Owner";
const OWNER_EMAIL: &str = "owner@adpulse.local";

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub insights: InsightsEngine,
    /// The user requests act as when they carry no `x-user-id`
    pub owner: User,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let owner = UserRepository::new(db_pool.clone())
            .ensure(config.auth.default_user_id, OWNER_NAME, OWNER_EMAIL)
            .await
            .context("failed to ensure default user")?;

        let insights = InsightsEngine::from_app_config(config);

        info!(
            owner_id = owner.id,
            language = ?insights.default_language(),
            "backend services ready"
        );

        Ok(Self {
            db_pool,
            insights,
            owner,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
