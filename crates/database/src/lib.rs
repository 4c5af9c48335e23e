//! AdPulse Database Crate
//!
//! This crate provides database functionality for the AdPulse backend,
//! including connection management, migrations, repositories, and the demo
//! fixtures used by the seed endpoints.

use sqlx::SqlitePool;
use adpulse_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod seed;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::*;
pub use entities::*;
pub use seed::{clear_all, seed, table_counts, SeedMode, SeedReport};

pub use types::{now_rfc3339, DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Migrated in-memory pool with the owner account (id 1) in place.
    pub async fn test_pool() -> SqlitePool {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = initialize_database(&config).await.unwrap();
        UserRepository::new(pool.clone())
            .ensure(1, "Owner", "owner@example.com")
            .await
            .unwrap();
        pool
    }

    pub async fn test_client(pool: &SqlitePool) -> Client {
        ClientRepository::new(pool.clone())
            .create(
                1,
                &CreateClientRequest {
                    name: "Najd Foods".to_string(),
                    email: Some("hello@najd.example".to_string()),
                    phone: None,
                    company: Some("Najd Foods Co.".to_string()),
                    industry: Some("food".to_string()),
                    address: None,
                    status: None,
                    notes: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn test_campaign(pool: &SqlitePool, client_id: Option<i64>) -> Campaign {
        CampaignRepository::new(pool.clone())
            .create(
                1,
                &CreateCampaignRequest {
                    name: "Ramadan Launch".to_string(),
                    client_id,
                    description: None,
                    status: None,
                    platform: "instagram".to_string(),
                    objective: Some("awareness".to_string()),
                    budget: 5000.0,
                    start_date: Some("2024-03-01".to_string()),
                    end_date: Some("2024-04-01".to_string()),
                    target_audience: None,
                },
            )
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_initialization_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("adpulse.db");
        let config = DatabaseConfig {
            url: format!("sqlite:{}", db_path.display()),
            max_connections: 2,
        };

        let pool = initialize_database(&config).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
