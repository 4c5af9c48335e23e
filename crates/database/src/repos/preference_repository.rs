//! User preference repository. One row per user.

use crate::entities::{UpdatePreferenceRequest, UserPreference};
use crate::types::{now_rfc3339, DatabaseResult};
use sqlx::SqlitePool;

const PREFERENCE_COLUMNS: &str = "id, user_id, language, theme, timezone, currency, email_notifications, push_notifications, created_at, updated_at";

#[derive(Clone)]
pub struct PreferenceRepository {
    pool: SqlitePool,
}

impl PreferenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_for_user(&self, user_id: i64) -> DatabaseResult<Option<UserPreference>> {
        let preference = sqlx::query_as::<_, UserPreference>(&format!(
            "SELECT {PREFERENCE_COLUMNS} FROM user_preferences WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(preference)
    }

    /// Preferences for the user, creating the default row on first access.
    pub async fn get_or_default(&self, user_id: i64) -> DatabaseResult<UserPreference> {
        self.ensure_row(user_id).await?;
        self.fetch(user_id).await
    }

    /// Apply the provided fields on top of the stored (or default) preferences.
    pub async fn upsert(
        &self,
        user_id: i64,
        request: &UpdatePreferenceRequest,
    ) -> DatabaseResult<UserPreference> {
        self.ensure_row(user_id).await?;

        sqlx::query(
            "UPDATE user_preferences SET
                language = COALESCE(?, language),
                theme = COALESCE(?, theme),
                timezone = COALESCE(?, timezone),
                currency = COALESCE(?, currency),
                email_notifications = COALESCE(?, email_notifications),
                push_notifications = COALESCE(?, push_notifications),
                updated_at = ?
             WHERE user_id = ?",
        )
        .bind(&request.language)
        .bind(&request.theme)
        .bind(&request.timezone)
        .bind(&request.currency)
        .bind(request.email_notifications)
        .bind(request.push_notifications)
        .bind(now_rfc3339())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.fetch(user_id).await
    }

    async fn ensure_row(&self, user_id: i64) -> DatabaseResult<()> {
        let now = now_rfc3339();
        sqlx::query(
            "INSERT INTO user_preferences (user_id, created_at, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, user_id: i64) -> DatabaseResult<UserPreference> {
        let preference = sqlx::query_as::<_, UserPreference>(&format!(
            "SELECT {PREFERENCE_COLUMNS} FROM user_preferences WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_defaults_on_first_read() {
        let pool = test_pool().await;
        let repo = PreferenceRepository::new(pool);

        assert!(repo.find_for_user(1).await.unwrap().is_none());
        let preference = repo.get_or_default(1).await.unwrap();
        assert_eq!(preference.language, "ar");
        assert_eq!(preference.currency, "SAR");
        assert!(preference.email_notifications);
    }

    #[tokio::test]
    async fn test_upsert_merges_fields() {
        let pool = test_pool().await;
        let repo = PreferenceRepository::new(pool);

        let first = repo
            .upsert(
                1,
                &UpdatePreferenceRequest {
                    theme: Some("dark".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let second = repo
            .upsert(
                1,
                &UpdatePreferenceRequest {
                    push_notifications: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.theme, "dark");
        assert!(!second.push_notifications);
        assert_eq!(second.timezone, "Asia/Riyadh");
    }
}
