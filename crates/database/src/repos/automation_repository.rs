//! Automation rule repository for database operations.

use crate::entities::{AutomationRule, CreateAutomationRuleRequest, UpdateAutomationRuleRequest};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::types::Json;
use sqlx::SqlitePool;

const RULE_COLUMNS: &str = "id, user_id, campaign_id, name, trigger_type, action_type, config, is_active, last_run_at, created_at, updated_at";

#[derive(Clone)]
pub struct AutomationRepository {
    pool: SqlitePool,
}

impl AutomationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<AutomationRule>> {
        let rules = sqlx::query_as::<_, AutomationRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM automation_rules WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<AutomationRule>> {
        let rule = sqlx::query_as::<_, AutomationRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM automation_rules WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rule)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<AutomationRule> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("automation rule", id))
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateAutomationRuleRequest,
    ) -> DatabaseResult<AutomationRule> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO automation_rules (user_id, campaign_id, name, trigger_type, action_type, config, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.campaign_id)
        .bind(&request.name)
        .bind(&request.trigger_type)
        .bind(&request.action_type)
        .bind(request.config.as_ref().map(Json))
        .bind(request.is_active)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateAutomationRuleRequest,
    ) -> DatabaseResult<AutomationRule> {
        let result = sqlx::query(
            "UPDATE automation_rules SET
                campaign_id = COALESCE(?, campaign_id),
                name = COALESCE(?, name),
                trigger_type = COALESCE(?, trigger_type),
                action_type = COALESCE(?, action_type),
                config = COALESCE(?, config),
                is_active = COALESCE(?, is_active),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(request.campaign_id)
        .bind(&request.name)
        .bind(&request.trigger_type)
        .bind(&request.action_type)
        .bind(request.config.as_ref().map(Json))
        .bind(request.is_active)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("automation rule", id));
        }
        self.get(id).await
    }

    /// Flip the rule between active and inactive.
    pub async fn toggle(&self, id: i64) -> DatabaseResult<AutomationRule> {
        let result = sqlx::query(
            "UPDATE automation_rules SET is_active = NOT is_active, updated_at = ? WHERE id = ?",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("automation rule", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM automation_rules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("automation rule", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use serde_json::json;

    fn request() -> CreateAutomationRuleRequest {
        CreateAutomationRuleRequest {
            campaign_id: None,
            name: "Pause on overspend".to_string(),
            trigger_type: "budget_threshold".to_string(),
            action_type: "pause_campaign".to_string(),
            config: Some(json!({"threshold": 0.9})),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_toggle_flips_state() {
        let pool = test_pool().await;
        let repo = AutomationRepository::new(pool);
        let rule = repo.create(1, &request()).await.unwrap();
        assert!(rule.is_active);

        let toggled = repo.toggle(rule.id).await.unwrap();
        assert!(!toggled.is_active);
        let toggled_back = repo.toggle(rule.id).await.unwrap();
        assert!(toggled_back.is_active);
    }

    #[tokio::test]
    async fn test_update_replaces_config_only_when_given() {
        let pool = test_pool().await;
        let repo = AutomationRepository::new(pool);
        let rule = repo.create(1, &request()).await.unwrap();

        let renamed = repo
            .update(
                rule.id,
                &UpdateAutomationRuleRequest {
                    name: Some("Pause early".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Pause early");
        assert_eq!(renamed.config, rule.config);

        let reconfigured = repo
            .update(
                rule.id,
                &UpdateAutomationRuleRequest {
                    config: Some(json!({"threshold": 0.5})),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reconfigured.config.unwrap().0["threshold"], 0.5);
    }
}
