//! Post and comment repositories for database operations.

use crate::entities::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostFilter, PostStatus,
    UpdatePostRequest,
};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const POST_COLUMNS: &str = "id, user_id, campaign_id, title, content, platform, media_url, status, scheduled_at, published_at, likes, shares, comments_count, created_at, updated_at";

/// Repository for social post database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &PostFilter) -> DatabaseResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE (? IS NULL OR status = ?) AND (? IS NULL OR platform = ?)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(filter.status)
        .bind(filter.status)
        .bind(&filter.platform)
        .bind(&filter.platform)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Post> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("post", id))
    }

    pub async fn create(&self, user_id: i64, request: &CreatePostRequest) -> DatabaseResult<Post> {
        let now = now_rfc3339();
        let status = request.status.unwrap_or(if request.scheduled_at.is_some() {
            PostStatus::Scheduled
        } else {
            PostStatus::Draft
        });

        let result = sqlx::query(
            "INSERT INTO posts (user_id, campaign_id, title, content, platform, media_url, status, scheduled_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.campaign_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.platform)
        .bind(&request.media_url)
        .bind(status)
        .bind(&request.scheduled_at)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, request: &UpdatePostRequest) -> DatabaseResult<Post> {
        let result = sqlx::query(
            "UPDATE posts SET
                campaign_id = COALESCE(?, campaign_id),
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                platform = COALESCE(?, platform),
                media_url = COALESCE(?, media_url),
                status = COALESCE(?, status),
                scheduled_at = COALESCE(?, scheduled_at),
                likes = COALESCE(?, likes),
                shares = COALESCE(?, shares),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(request.campaign_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.platform)
        .bind(&request.media_url)
        .bind(request.status)
        .bind(&request.scheduled_at)
        .bind(request.likes)
        .bind(request.shares)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("post", id));
        }
        self.get(id).await
    }

    /// Mark the post as published now.
    pub async fn publish(&self, id: i64) -> DatabaseResult<Post> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "UPDATE posts SET status = 'published', published_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("post", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("post", id));
        }
        Ok(())
    }
}

/// Repository for post comments. Keeps `posts.comments_count` in step.
#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_post(&self, post_id: i64) -> DatabaseResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, user_id, author_name, content, created_at FROM comments WHERE post_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        request: &CreateCommentRequest,
    ) -> DatabaseResult<Comment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO comments (post_id, user_id, author_name, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(&request.author_name)
        .bind(&request.content)
        .bind(now_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, user_id, author_name, content, created_at FROM comments WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(comment)
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        let post_id: Option<i64> = sqlx::query_scalar("SELECT post_id FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(post_id) = post_id else {
            return Err(DatabaseError::not_found("comment", id));
        };

        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "UPDATE posts SET comments_count = MAX(comments_count - 1, 0) WHERE id = ?",
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    fn request(platform: &str, scheduled_at: Option<&str>) -> CreatePostRequest {
        CreatePostRequest {
            campaign_id: None,
            title: "New menu".to_string(),
            content: "Try our new dishes".to_string(),
            platform: platform.to_string(),
            media_url: None,
            status: None,
            scheduled_at: scheduled_at.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_status_follows_schedule() {
        let pool = test_pool().await;
        let repo = PostRepository::new(pool);

        let draft = repo.create(1, &request("x", None)).await.unwrap();
        let scheduled = repo
            .create(1, &request("x", Some("2030-01-01T09:00:00Z")))
            .await
            .unwrap();

        assert_eq!(draft.status, PostStatus::Draft);
        assert_eq!(scheduled.status, PostStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_publish_sets_timestamp() {
        let pool = test_pool().await;
        let repo = PostRepository::new(pool);
        let post = repo.create(1, &request("instagram", None)).await.unwrap();

        let published = repo.publish(post.id).await.unwrap();
        assert_eq!(published.status, PostStatus::Published);
        assert!(published.published_at.is_some());
    }

    #[tokio::test]
    async fn test_filters_by_platform() {
        let pool = test_pool().await;
        let repo = PostRepository::new(pool);
        repo.create(1, &request("instagram", None)).await.unwrap();
        repo.create(1, &request("linkedin", None)).await.unwrap();

        let filter = PostFilter {
            platform: Some("linkedin".to_string()),
            ..Default::default()
        };
        let posts = repo.list(&filter).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].platform, "linkedin");
    }

    #[tokio::test]
    async fn test_comments_track_count() {
        let pool = test_pool().await;
        let posts = PostRepository::new(pool.clone());
        let comments = CommentRepository::new(pool);
        let post = posts.create(1, &request("x", None)).await.unwrap();

        let comment_request = CreateCommentRequest {
            author_name: "Huda".to_string(),
            content: "Looks great".to_string(),
        };
        let first = comments.create(post.id, 1, &comment_request).await.unwrap();
        comments.create(post.id, 1, &comment_request).await.unwrap();
        assert_eq!(posts.get(post.id).await.unwrap().comments_count, 2);

        comments.delete(first.id).await.unwrap();
        assert_eq!(posts.get(post.id).await.unwrap().comments_count, 1);
        assert_eq!(comments.list_by_post(post.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let pool = test_pool().await;
        let error = CommentRepository::new(pool)
            .create(
                77,
                1,
                &CreateCommentRequest {
                    author_name: "Huda".to_string(),
                    content: "Hello".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(error, DatabaseError::ConstraintViolation(_)));
    }
}
