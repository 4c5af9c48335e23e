//! Campaign repository for database operations.

use crate::entities::{
    Campaign, CampaignFilter, CampaignStats, CampaignStatus, CreateCampaignRequest,
    UpdateCampaignRequest,
};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const CAMPAIGN_COLUMNS: &str = "id, user_id, client_id, name, description, status, platform, objective, budget, spent, start_date, end_date, target_audience, is_archived, created_at, updated_at";

/// Repository for campaign database operations
#[derive(Clone)]
pub struct CampaignRepository {
    pool: SqlitePool,
}

impl CampaignRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List campaigns matching the filter. Archived campaigns are hidden unless requested.
    pub async fn list(&self, filter: &CampaignFilter) -> DatabaseResult<Vec<Campaign>> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns
             WHERE (? IS NULL OR status = ?)
               AND (? IS NULL OR client_id = ?)
               AND (? OR is_archived = false)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(filter.status)
        .bind(filter.status)
        .bind(filter.client_id)
        .bind(filter.client_id)
        .bind(filter.include_archived)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn list_by_client(&self, client_id: i64) -> DatabaseResult<Vec<Campaign>> {
        self.list(&CampaignFilter {
            client_id: Some(client_id),
            include_archived: true,
            ..Default::default()
        })
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Campaign> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("campaign", id))
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateCampaignRequest,
    ) -> DatabaseResult<Campaign> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO campaigns (user_id, client_id, name, description, status, platform, objective, budget, spent, start_date, end_date, target_audience, is_archived, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, false, ?, ?)",
        )
        .bind(user_id)
        .bind(request.client_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.status.unwrap_or(CampaignStatus::Draft))
        .bind(&request.platform)
        .bind(&request.objective)
        .bind(request.budget)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(&request.target_audience)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateCampaignRequest,
    ) -> DatabaseResult<Campaign> {
        let result = sqlx::query(
            "UPDATE campaigns SET
                name = COALESCE(?, name),
                client_id = COALESCE(?, client_id),
                description = COALESCE(?, description),
                status = COALESCE(?, status),
                platform = COALESCE(?, platform),
                objective = COALESCE(?, objective),
                budget = COALESCE(?, budget),
                spent = COALESCE(?, spent),
                start_date = COALESCE(?, start_date),
                end_date = COALESCE(?, end_date),
                target_audience = COALESCE(?, target_audience),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(request.client_id)
        .bind(&request.description)
        .bind(request.status)
        .bind(&request.platform)
        .bind(&request.objective)
        .bind(request.budget)
        .bind(request.spent)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(&request.target_audience)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("campaign", id));
        }
        self.get(id).await
    }

    /// Soft delete: the campaign stays in the table but leaves the default listing.
    pub async fn archive(&self, id: i64) -> DatabaseResult<Campaign> {
        let result =
            sqlx::query("UPDATE campaigns SET is_archived = true, updated_at = ? WHERE id = ?")
                .bind(now_rfc3339())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("campaign", id));
        }
        self.get(id).await
    }

    /// Hard delete. Ads and analytics rows go with the campaign.
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("campaign", id));
        }
        Ok(())
    }

    /// Status counts and budget totals across non-archived campaigns.
    pub async fn stats(&self) -> DatabaseResult<CampaignStats> {
        let stats = sqlx::query_as::<_, CampaignStats>(
            "SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END), 0) AS active,
                COALESCE(SUM(CASE WHEN status = 'paused' THEN 1 ELSE 0 END), 0) AS paused,
                COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed,
                CAST(COALESCE(SUM(budget), 0) AS REAL) AS total_budget,
                CAST(COALESCE(SUM(spent), 0) AS REAL) AS total_spent
             FROM campaigns WHERE is_archived = false",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{AdRepository, ClientRepository};
    use crate::entities::CreateAdRequest;
    use crate::test_support::{test_campaign, test_client, test_pool};

    #[tokio::test]
    async fn test_create_campaign_defaults() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;

        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(campaign.spent, 0.0);
        assert!(!campaign.is_archived);
    }

    #[tokio::test]
    async fn test_archive_hides_from_default_listing() {
        let pool = test_pool().await;
        let repo = CampaignRepository::new(pool.clone());
        let kept = test_campaign(&pool, None).await;
        let archived = test_campaign(&pool, None).await;

        let result = repo.archive(archived.id).await.unwrap();
        assert!(result.is_archived);

        let visible = repo.list(&CampaignFilter::default()).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, kept.id);

        let everything = repo
            .list(&CampaignFilter {
                include_archived: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_status_and_client() {
        let pool = test_pool().await;
        let repo = CampaignRepository::new(pool.clone());
        let client = test_client(&pool).await;
        let linked = test_campaign(&pool, Some(client.id)).await;
        test_campaign(&pool, None).await;

        repo.update(
            linked.id,
            &UpdateCampaignRequest {
                status: Some(CampaignStatus::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let active = repo
            .list(&CampaignFilter {
                status: Some(CampaignStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);

        let for_client = repo.list_by_client(client.id).await.unwrap();
        assert_eq!(for_client.len(), 1);
        assert_eq!(for_client[0].id, linked.id);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_ads() {
        let pool = test_pool().await;
        let repo = CampaignRepository::new(pool.clone());
        let ads = AdRepository::new(pool.clone());
        let campaign = test_campaign(&pool, None).await;

        ads.create(&CreateAdRequest {
            campaign_id: campaign.id,
            title: "Iftar offer".to_string(),
            content: "Two meals for one".to_string(),
            image_url: None,
            platform: "instagram".to_string(),
            ad_type: None,
            status: None,
        })
        .await
        .unwrap();

        repo.delete(campaign.id).await.unwrap();
        assert!(repo.find_by_id(campaign.id).await.unwrap().is_none());
        assert!(ads.list(Some(campaign.id)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_client_detaches_campaigns() {
        let pool = test_pool().await;
        let repo = CampaignRepository::new(pool.clone());
        let client = test_client(&pool).await;
        let campaign = test_campaign(&pool, Some(client.id)).await;

        ClientRepository::new(pool.clone()).delete(client.id).await.unwrap();

        let campaign = repo.get(campaign.id).await.unwrap();
        assert_eq!(campaign.client_id, None);
    }

    #[tokio::test]
    async fn test_stats_ignore_archived() {
        let pool = test_pool().await;
        let repo = CampaignRepository::new(pool.clone());
        let first = test_campaign(&pool, None).await;
        let second = test_campaign(&pool, None).await;

        repo.update(
            first.id,
            &UpdateCampaignRequest {
                status: Some(CampaignStatus::Active),
                spent: Some(1200.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        repo.archive(second.id).await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.total_budget, 5000.0);
        assert_eq!(stats.total_spent, 1200.0);
    }

    #[tokio::test]
    async fn test_stats_on_empty_table() {
        let pool = test_pool().await;
        let stats = CampaignRepository::new(pool).stats().await.unwrap();
        assert_eq!(stats, CampaignStats::default());
    }
}
