//! User repository for database operations.

use crate::entities::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at, last_signed_in";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, request: &CreateUserRequest) -> DatabaseResult<User> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO users (name, email, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(request.role.unwrap_or(UserRole::User))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> DatabaseResult<User> {
        let result = sqlx::query(
            "UPDATE users SET name = COALESCE(?, name), email = COALESCE(?, email), role = COALESCE(?, role), updated_at = ? WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(request.role)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("user", id));
        }
        self.get(id).await
    }

    /// Record a sign-in for the user.
    pub async fn touch_sign_in(&self, id: i64) -> DatabaseResult<()> {
        sqlx::query("UPDATE users SET last_signed_in = ? WHERE id = ?")
            .bind(now_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert the user with a fixed id unless it already exists.
    pub async fn ensure(&self, id: i64, name: &str, email: &str) -> DatabaseResult<User> {
        let now = now_rfc3339();
        sqlx::query(
            "INSERT OR IGNORE INTO users (id, name, email, role, created_at, updated_at) VALUES (?, ?, ?, 'admin', ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Sara".to_string(),
            email: email.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo.create(&request("sara@example.com")).await.unwrap();
        assert_eq!(user.role, UserRole::User);

        let found = repo.find_by_email("sara@example.com").await.unwrap().unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool);

        repo.create(&request("dup@example.com")).await.unwrap();
        let error = repo.create(&request("dup@example.com")).await.unwrap_err();
        assert!(matches!(error, DatabaseError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool);

        let first = repo.ensure(1, "Owner", "owner@example.com").await.unwrap();
        let second = repo.ensure(1, "Other", "other@example.com").await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.name, "Owner");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool);

        let error = repo.update(99, &UpdateUserRequest::default()).await.unwrap_err();
        assert!(matches!(error, DatabaseError::NotFound(_)));
    }
}
