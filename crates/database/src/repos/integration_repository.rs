//! Social media integration repository for database operations.

use crate::entities::{CreateIntegrationRequest, SocialMediaIntegration, UpdateIntegrationRequest};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const INTEGRATION_COLUMNS: &str = "id, user_id, platform, account_name, account_id, access_token, is_connected, connected_at, created_at, updated_at";

#[derive(Clone)]
pub struct IntegrationRepository {
    pool: SqlitePool,
}

impl IntegrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<SocialMediaIntegration>> {
        let integrations = sqlx::query_as::<_, SocialMediaIntegration>(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM social_media_integrations WHERE user_id = ? ORDER BY platform ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(integrations)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<SocialMediaIntegration>> {
        let integration = sqlx::query_as::<_, SocialMediaIntegration>(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM social_media_integrations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(integration)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<SocialMediaIntegration> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("integration", id))
    }

    /// Connect an account. The integration starts out connected.
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateIntegrationRequest,
    ) -> DatabaseResult<SocialMediaIntegration> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO social_media_integrations (user_id, platform, account_name, account_id, access_token, is_connected, connected_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, true, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.platform)
        .bind(&request.account_name)
        .bind(&request.account_id)
        .bind(&request.access_token)
        .bind(&now)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateIntegrationRequest,
    ) -> DatabaseResult<SocialMediaIntegration> {
        let result = sqlx::query(
            "UPDATE social_media_integrations SET
                account_name = COALESCE(?, account_name),
                account_id = COALESCE(?, account_id),
                access_token = COALESCE(?, access_token),
                is_connected = COALESCE(?, is_connected),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.account_name)
        .bind(&request.account_id)
        .bind(&request.access_token)
        .bind(request.is_connected)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("integration", id));
        }
        self.get(id).await
    }

    /// Mark the account disconnected and forget its token.
    pub async fn disconnect(&self, id: i64) -> DatabaseResult<SocialMediaIntegration> {
        let result = sqlx::query(
            "UPDATE social_media_integrations SET is_connected = false, access_token = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("integration", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM social_media_integrations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("integration", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_connect_then_disconnect() {
        let pool = test_pool().await;
        let repo = IntegrationRepository::new(pool);

        let integration = repo
            .create(
                1,
                &CreateIntegrationRequest {
                    platform: "instagram".to_string(),
                    account_name: "@najd.foods".to_string(),
                    account_id: Some("178414".to_string()),
                    access_token: Some("secret-token".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(integration.is_connected);
        assert!(integration.connected_at.is_some());

        let json = serde_json::to_value(&integration).unwrap();
        assert!(json.get("access_token").is_none());

        let disconnected = repo.disconnect(integration.id).await.unwrap();
        assert!(!disconnected.is_connected);
        assert_eq!(disconnected.access_token, None);
    }
}
