//! Notification repository for database operations.

use crate::entities::{CreateNotificationRequest, Notification, NotificationType};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const NOTIFICATION_COLUMNS: &str = "id, user_id, type, title, message, link, is_read, created_at";

/// Repository for notification database operations
#[derive(Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    /// Create a new notification repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Notifications for a user, newest first
    pub async fn list_for_user(
        &self,
        user_id: i64,
        unread_only: bool,
    ) -> DatabaseResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE user_id = ? AND (? = false OR is_read = false)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Notification> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("notification", id))
    }

    /// Create a new notification
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateNotificationRequest,
    ) -> DatabaseResult<Notification> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, type, title, message, link, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, false, ?)",
        )
        .bind(user_id)
        .bind(request.notification_type.unwrap_or(NotificationType::Info))
        .bind(&request.title)
        .bind(&request.message)
        .bind(&request.link)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Mark notification as read
    pub async fn mark_read(&self, id: i64) -> DatabaseResult<Notification> {
        let result = sqlx::query("UPDATE notifications SET is_read = true WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("notification", id));
        }
        self.get(id).await
    }

    /// Mark every notification of a user as read, returning how many changed
    pub async fn mark_all_read(&self, user_id: i64) -> DatabaseResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true WHERE user_id = ? AND is_read = false",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get unread notification count for user
    pub async fn unread_count(&self, user_id: i64) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("notification", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    fn create_test_notification_request(title: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            notification_type: Some(NotificationType::Campaign),
            title: title.to_string(),
            message: "Campaign budget is 80% spent".to_string(),
            link: Some("/campaigns/1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_notification() {
        let pool = test_pool().await;
        let repo = NotificationRepository::new(pool);

        let notification = repo
            .create(1, &create_test_notification_request("Budget alert"))
            .await
            .unwrap();

        assert_eq!(notification.notification_type, NotificationType::Campaign);
        assert!(!notification.is_read);
    }

    #[tokio::test]
    async fn test_unread_tracking() {
        let pool = test_pool().await;
        let repo = NotificationRepository::new(pool);

        let first = repo
            .create(1, &create_test_notification_request("One"))
            .await
            .unwrap();
        repo.create(1, &create_test_notification_request("Two"))
            .await
            .unwrap();
        assert_eq!(repo.unread_count(1).await.unwrap(), 2);

        let read = repo.mark_read(first.id).await.unwrap();
        assert!(read.is_read);
        assert_eq!(repo.unread_count(1).await.unwrap(), 1);
        assert_eq!(repo.list_for_user(1, true).await.unwrap().len(), 1);
        assert_eq!(repo.list_for_user(1, false).await.unwrap().len(), 2);

        assert_eq!(repo.mark_all_read(1).await.unwrap(), 1);
        assert_eq!(repo.unread_count(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_notifications_are_scoped_to_user() {
        let pool = test_pool().await;
        crate::repos::UserRepository::new(pool.clone())
            .ensure(2, "Second", "second@example.com")
            .await
            .unwrap();
        let repo = NotificationRepository::new(pool);

        repo.create(2, &create_test_notification_request("Theirs"))
            .await
            .unwrap();

        assert!(repo.list_for_user(1, false).await.unwrap().is_empty());
        assert_eq!(repo.unread_count(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_missing_notification() {
        let pool = test_pool().await;
        let error = NotificationRepository::new(pool).mark_read(5).await.unwrap_err();
        assert!(matches!(error, DatabaseError::NotFound(_)));
    }
}
