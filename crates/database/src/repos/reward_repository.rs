//! Reward repository for database operations.

use crate::entities::{CreateRewardRequest, Reward, RewardStatus};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const REWARD_COLUMNS: &str =
    "id, user_id, title, description, points, reward_type, status, claimed_at, created_at";

#[derive(Clone)]
pub struct RewardRepository {
    pool: SqlitePool,
}

impl RewardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<Reward>> {
        let rewards = sqlx::query_as::<_, Reward>(&format!(
            "SELECT {REWARD_COLUMNS} FROM rewards WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rewards)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Reward>> {
        let reward = sqlx::query_as::<_, Reward>(&format!(
            "SELECT {REWARD_COLUMNS} FROM rewards WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reward)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Reward> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("reward", id))
    }

    pub async fn create(&self, user_id: i64, request: &CreateRewardRequest) -> DatabaseResult<Reward> {
        let result = sqlx::query(
            "INSERT INTO rewards (user_id, title, description, points, reward_type, status, created_at)
             VALUES (?, ?, ?, ?, ?, 'available', ?)",
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.points)
        .bind(request.reward_type.as_deref().unwrap_or("bonus"))
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Claim an available reward. Claimed or expired rewards are rejected.
    pub async fn claim(&self, id: i64) -> DatabaseResult<Reward> {
        let reward = self.get(id).await?;
        if reward.status != RewardStatus::Available {
            return Err(DatabaseError::ValidationError(format!(
                "reward {id} cannot be claimed"
            )));
        }

        sqlx::query(
            "UPDATE rewards SET status = 'claimed', claimed_at = ? WHERE id = ? AND status = 'available'",
        )
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM rewards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("reward", id));
        }
        Ok(())
    }

    /// Points collected through claimed rewards.
    pub async fn total_points(&self, user_id: i64) -> DatabaseResult<i64> {
        let points: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(points), 0) FROM rewards WHERE user_id = ? AND status = 'claimed'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(points)
    }
}
