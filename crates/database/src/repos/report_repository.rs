//! Report repository for database operations.

use crate::entities::{CreateReportRequest, Report};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::types::Json;
use sqlx::SqlitePool;

const REPORT_COLUMNS: &str = "id, user_id, campaign_id, title, report_type, data, created_at";

#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(report)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Report> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("report", id))
    }

    pub async fn create(&self, user_id: i64, request: &CreateReportRequest) -> DatabaseResult<Report> {
        let result = sqlx::query(
            "INSERT INTO reports (user_id, campaign_id, title, report_type, data, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.campaign_id)
        .bind(&request.title)
        .bind(&request.report_type)
        .bind(request.data.as_ref().map(Json))
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("report", id));
        }
        Ok(())
    }
}
