//! Read-only aggregates for the dashboard.

use crate::entities::DashboardSummary;
use crate::types::DatabaseResult;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Summary for the given user. Unread notifications are per user, everything else is global.
    pub async fn summary(&self, user_id: i64) -> DatabaseResult<DashboardSummary> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            "SELECT
                (SELECT COUNT(*) FROM clients) AS total_clients,
                (SELECT COUNT(*) FROM campaigns WHERE is_archived = false) AS total_campaigns,
                (SELECT COUNT(*) FROM campaigns WHERE is_archived = false AND status = 'active') AS active_campaigns,
                (SELECT COUNT(*) FROM posts) AS total_posts,
                (SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = false) AS unread_notifications,
                (SELECT CAST(COALESCE(SUM(budget), 0) AS REAL) FROM campaigns WHERE is_archived = false) AS total_budget,
                (SELECT CAST(COALESCE(SUM(spent), 0) AS REAL) FROM campaigns WHERE is_archived = false) AS total_spent,
                (SELECT CAST(COALESCE(SUM(total), 0) AS REAL) FROM invoices WHERE status = 'paid') AS total_revenue,
                (SELECT CAST(COALESCE(SUM(total), 0) AS REAL) FROM invoices WHERE status IN ('sent', 'overdue')) AS outstanding_amount,
                (SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM payments WHERE status = 'completed') AS completed_payments",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}
