//! Repositories for assistant chats and generated marketing content.

use crate::entities::{
    AiChat, AiChatMessage, AiChatWithMessages, AiGeneratedContent, ChatRole,
    CreateAiChatRequest, CreateGeneratedContentRequest, GeneratedContentType,
};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::types::Json;
use sqlx::SqlitePool;

const CONTENT_COLUMNS: &str =
    "id, user_id, campaign_id, content_type, platform, prompt, content, metadata, created_at";

/// Repository for assistant chats and their messages
#[derive(Clone)]
pub struct AiChatRepository {
    pool: SqlitePool,
}

impl AiChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Chats of a user, most recently active first
    pub async fn list_for_user(&self, user_id: i64) -> DatabaseResult<Vec<AiChat>> {
        let chats = sqlx::query_as::<_, AiChat>(
            "SELECT id, user_id, title, created_at, updated_at FROM ai_chats WHERE user_id = ? ORDER BY updated_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chats)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<AiChat>> {
        let chat = sqlx::query_as::<_, AiChat>(
            "SELECT id, user_id, title, created_at, updated_at FROM ai_chats WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(chat)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<AiChat> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("ai chat", id))
    }

    pub async fn get_with_messages(&self, id: i64) -> DatabaseResult<AiChatWithMessages> {
        let chat = self.get(id).await?;
        let messages = self.messages(id).await?;
        Ok(AiChatWithMessages { chat, messages })
    }

    pub async fn messages(&self, chat_id: i64) -> DatabaseResult<Vec<AiChatMessage>> {
        let messages = sqlx::query_as::<_, AiChatMessage>(
            "SELECT id, chat_id, role, content, created_at FROM ai_chat_messages WHERE chat_id = ? ORDER BY id ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn create(&self, user_id: i64, request: &CreateAiChatRequest) -> DatabaseResult<AiChat> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO ai_chats (user_id, title, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Append a message and bump the chat's activity timestamp.
    pub async fn add_message(
        &self,
        chat_id: i64,
        role: ChatRole,
        content: &str,
    ) -> DatabaseResult<AiChatMessage> {
        let now = now_rfc3339();
        let mut tx = self.pool.begin().await?;

        let touched = sqlx::query("UPDATE ai_chats SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(chat_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ai chat", chat_id));
        }

        let result = sqlx::query(
            "INSERT INTO ai_chat_messages (chat_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_id)
        .bind(role)
        .bind(content)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let message = sqlx::query_as::<_, AiChatMessage>(
            "SELECT id, chat_id, role, content, created_at FROM ai_chat_messages WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM ai_chats WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ai chat", id));
        }
        Ok(())
    }
}

/// Repository for stored generator output
#[derive(Clone)]
pub struct GeneratedContentRepository {
    pool: SqlitePool,
}

impl GeneratedContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        user_id: i64,
        content_type: Option<GeneratedContentType>,
    ) -> DatabaseResult<Vec<AiGeneratedContent>> {
        let content = sqlx::query_as::<_, AiGeneratedContent>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM ai_generated_content
             WHERE user_id = ? AND (? IS NULL OR content_type = ?)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .bind(content_type)
        .bind(content_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<AiGeneratedContent>> {
        let content = sqlx::query_as::<_, AiGeneratedContent>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM ai_generated_content WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(content)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<AiGeneratedContent> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("generated content", id))
    }

    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateGeneratedContentRequest,
    ) -> DatabaseResult<AiGeneratedContent> {
        let result = sqlx::query(
            "INSERT INTO ai_generated_content (user_id, campaign_id, content_type, platform, prompt, content, metadata, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.campaign_id)
        .bind(request.content_type)
        .bind(&request.platform)
        .bind(&request.prompt)
        .bind(&request.content)
        .bind(request.metadata.as_ref().map(Json))
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM ai_generated_content WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("generated content", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn test_chat_messages_in_order() {
        let pool = test_pool().await;
        let repo = AiChatRepository::new(pool);
        let chat = repo
            .create(
                1,
                &CreateAiChatRequest {
                    title: "Campaign ideas".to_string(),
                },
            )
            .await
            .unwrap();

        repo.add_message(chat.id, ChatRole::User, "Suggest a slogan")
            .await
            .unwrap();
        repo.add_message(chat.id, ChatRole::Assistant, "Taste the season")
            .await
            .unwrap();

        let full = repo.get_with_messages(chat.id).await.unwrap();
        assert_eq!(full.messages.len(), 2);
        assert_eq!(full.messages[0].role, ChatRole::User);
        assert_eq!(full.messages[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_message_for_missing_chat() {
        let pool = test_pool().await;
        let error = AiChatRepository::new(pool)
            .add_message(12, ChatRole::User, "hello")
            .await
            .unwrap_err();
        assert!(matches!(error, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deleting_chat_removes_messages() {
        let pool = test_pool().await;
        let repo = AiChatRepository::new(pool);
        let chat = repo
            .create(1, &CreateAiChatRequest { title: "Temp".to_string() })
            .await
            .unwrap();
        repo.add_message(chat.id, ChatRole::User, "hi").await.unwrap();

        repo.delete(chat.id).await.unwrap();
        assert!(repo.messages(chat.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generated_content_keeps_metadata() {
        let pool = test_pool().await;
        let repo = GeneratedContentRepository::new(pool);

        let stored = repo
            .create(
                1,
                &CreateGeneratedContentRequest {
                    campaign_id: None,
                    content_type: GeneratedContentType::Design,
                    platform: Some("instagram".to_string()),
                    prompt: "Summer banner".to_string(),
                    content: "https://placehold.co/1080x1080".to_string(),
                    metadata: Some(json!({"width": 1080, "height": 1080})),
                },
            )
            .await
            .unwrap();

        let metadata = stored.metadata.clone().unwrap().0;
        assert_eq!(metadata["width"], 1080);

        assert_eq!(
            repo.list(1, Some(GeneratedContentType::Design)).await.unwrap().len(),
            1
        );
        assert!(repo
            .list(1, Some(GeneratedContentType::Copy))
            .await
            .unwrap()
            .is_empty());
    }
}
