//! Client repository for database operations.

use crate::entities::{Client, ClientStatus, CreateClientRequest, UpdateClientRequest};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;

const CLIENT_COLUMNS: &str =
    "id, user_id, name, email, phone, company, industry, address, status, notes, created_at, updated_at";

/// Repository for client database operations
#[derive(Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List clients, newest first, optionally narrowed to one status.
    pub async fn list(&self, status: Option<ClientStatus>) -> DatabaseResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE (? IS NULL OR status = ?) ORDER BY created_at DESC, id DESC"
        ))
        .bind(status)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Client> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("client", id))
    }

    pub async fn create(&self, user_id: i64, request: &CreateClientRequest) -> DatabaseResult<Client> {
        let now = now_rfc3339();
        let result = sqlx::query(
            "INSERT INTO clients (user_id, name, email, phone, company, industry, address, status, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company)
        .bind(&request.industry)
        .bind(&request.address)
        .bind(request.status.unwrap_or(ClientStatus::Active))
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, request: &UpdateClientRequest) -> DatabaseResult<Client> {
        let result = sqlx::query(
            "UPDATE clients SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                company = COALESCE(?, company),
                industry = COALESCE(?, industry),
                address = COALESCE(?, address),
                status = COALESCE(?, status),
                notes = COALESCE(?, notes),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company)
        .bind(&request.industry)
        .bind(&request.address)
        .bind(request.status)
        .bind(&request.notes)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("client", id));
        }
        self.get(id).await
    }

    /// Delete a client. Fails with a constraint violation while invoices still reference it.
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("client", id));
        }
        Ok(())
    }
}
