//! Analytics repository for database operations.

use crate::entities::{Analytics, AnalyticsSummary, CreateAnalyticsRequest};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const ANALYTICS_COLUMNS: &str =
    "id, campaign_id, ad_id, date, impressions, clicks, conversions, spend, revenue, created_at";

/// Repository for daily campaign metrics
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Metrics rows ordered by date, optionally for a single campaign.
    pub async fn list(&self, campaign_id: Option<i64>) -> DatabaseResult<Vec<Analytics>> {
        let rows = sqlx::query_as::<_, Analytics>(&format!(
            "SELECT {ANALYTICS_COLUMNS} FROM analytics WHERE (? IS NULL OR campaign_id = ?) ORDER BY date ASC, id ASC"
        ))
        .bind(campaign_id)
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Analytics>> {
        let row = sqlx::query_as::<_, Analytics>(&format!(
            "SELECT {ANALYTICS_COLUMNS} FROM analytics WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Analytics> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("analytics", id))
    }

    pub async fn create(&self, request: &CreateAnalyticsRequest) -> DatabaseResult<Analytics> {
        let result = sqlx::query(
            "INSERT INTO analytics (campaign_id, ad_id, date, impressions, clicks, conversions, spend, revenue, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.campaign_id)
        .bind(request.ad_id)
        .bind(&request.date)
        .bind(request.impressions)
        .bind(request.clicks)
        .bind(request.conversions)
        .bind(request.spend)
        .bind(request.revenue)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("analytics", id))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM analytics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("analytics", id));
        }
        Ok(())
    }

    /// Totals across every metrics row, optionally for a single campaign.
    pub async fn summary(&self, campaign_id: Option<i64>) -> DatabaseResult<AnalyticsSummary> {
        let summary = sqlx::query_as::<_, AnalyticsSummary>(
            "SELECT
                COALESCE(SUM(impressions), 0) AS impressions,
                COALESCE(SUM(clicks), 0) AS clicks,
                COALESCE(SUM(conversions), 0) AS conversions,
                CAST(COALESCE(SUM(spend), 0) AS REAL) AS spend,
                CAST(COALESCE(SUM(revenue), 0) AS REAL) AS revenue
             FROM analytics WHERE (? IS NULL OR campaign_id = ?)",
        )
        .bind(campaign_id)
        .bind(campaign_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_campaign, test_pool};

    fn day(campaign_id: i64, date: &str, clicks: i64) -> CreateAnalyticsRequest {
        CreateAnalyticsRequest {
            campaign_id,
            ad_id: None,
            date: date.to_string(),
            impressions: 1000,
            clicks,
            conversions: 5,
            spend: 100.0,
            revenue: 250.0,
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_date() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;
        let repo = AnalyticsRepository::new(pool);

        repo.create(&day(campaign.id, "2024-03-02", 20)).await.unwrap();
        repo.create(&day(campaign.id, "2024-03-01", 10)).await.unwrap();

        let rows = repo.list(Some(campaign.id)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-03-01");
    }

    #[tokio::test]
    async fn test_summary_totals_and_ratios() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;
        let other = test_campaign(&pool, None).await;
        let repo = AnalyticsRepository::new(pool);

        repo.create(&day(campaign.id, "2024-03-01", 10)).await.unwrap();
        repo.create(&day(campaign.id, "2024-03-02", 30)).await.unwrap();
        repo.create(&day(other.id, "2024-03-02", 99)).await.unwrap();

        let summary = repo.summary(Some(campaign.id)).await.unwrap();
        assert_eq!(summary.impressions, 2000);
        assert_eq!(summary.clicks, 40);
        assert_eq!(summary.spend, 200.0);
        assert!((summary.ctr() - 2.0).abs() < f64::EPSILON);
        assert!((summary.roas() - 2.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_summary_of_campaign_without_data() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;
        let summary = AnalyticsRepository::new(pool)
            .summary(Some(campaign.id))
            .await
            .unwrap();

        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(summary.ctr(), 0.0);
    }
}
