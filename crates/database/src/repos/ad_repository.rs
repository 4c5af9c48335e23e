//! Ad repository for database operations.

use crate::entities::{Ad, AdStatus, CreateAdRequest, UpdateAdRequest};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const AD_COLUMNS: &str = "id, campaign_id, title, content, image_url, platform, ad_type, status, impressions, clicks, conversions, created_at, updated_at";

/// Repository for ad database operations
#[derive(Clone)]
pub struct AdRepository {
    pool: SqlitePool,
}

impl AdRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, campaign_id: Option<i64>) -> DatabaseResult<Vec<Ad>> {
        let ads = sqlx::query_as::<_, Ad>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE (? IS NULL OR campaign_id = ?) ORDER BY created_at DESC, id DESC"
        ))
        .bind(campaign_id)
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ads)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Ad>> {
        let ad = sqlx::query_as::<_, Ad>(&format!("SELECT {AD_COLUMNS} FROM ads WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ad)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Ad> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("ad", id))
    }

    pub async fn create(&self, request: &CreateAdRequest) -> DatabaseResult<Ad> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO ads (campaign_id, title, content, image_url, platform, ad_type, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.campaign_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.image_url)
        .bind(&request.platform)
        .bind(request.ad_type.as_deref().unwrap_or("image"))
        .bind(request.status.unwrap_or(AdStatus::Draft))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, request: &UpdateAdRequest) -> DatabaseResult<Ad> {
        let result = sqlx::query(
            "UPDATE ads SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                image_url = COALESCE(?, image_url),
                platform = COALESCE(?, platform),
                ad_type = COALESCE(?, ad_type),
                status = COALESCE(?, status),
                impressions = COALESCE(?, impressions),
                clicks = COALESCE(?, clicks),
                conversions = COALESCE(?, conversions),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.image_url)
        .bind(&request.platform)
        .bind(&request.ad_type)
        .bind(request.status)
        .bind(request.impressions)
        .bind(request.clicks)
        .bind(request.conversions)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ad", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ad", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_campaign, test_pool};

    fn request(campaign_id: i64) -> CreateAdRequest {
        CreateAdRequest {
            campaign_id,
            title: "Weekend sale".to_string(),
            content: "Everything 20% off".to_string(),
            image_url: None,
            platform: "facebook".to_string(),
            ad_type: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_ad_defaults() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;
        let ad = AdRepository::new(pool).create(&request(campaign.id)).await.unwrap();

        assert_eq!(ad.ad_type, "image");
        assert_eq!(ad.status, AdStatus::Draft);
        assert_eq!(ad.impressions, 0);
    }

    #[tokio::test]
    async fn test_ad_requires_existing_campaign() {
        let pool = test_pool().await;
        let error = AdRepository::new(pool).create(&request(999)).await.unwrap_err();
        assert!(matches!(error, DatabaseError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_update_counters() {
        let pool = test_pool().await;
        let campaign = test_campaign(&pool, None).await;
        let repo = AdRepository::new(pool);
        let ad = repo.create(&request(campaign.id)).await.unwrap();

        let updated = repo
            .update(
                ad.id,
                &UpdateAdRequest {
                    impressions: Some(1000),
                    clicks: Some(40),
                    status: Some(AdStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.impressions, 1000);
        assert_eq!(updated.clicks, 40);
        assert_eq!(updated.status, AdStatus::Active);
        assert_eq!(updated.title, ad.title);
    }
}
