//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl DatabaseError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db_error) => match db_error.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    DatabaseError::ConstraintViolation(db_error.message().to_string())
                }
                sqlx::error::ErrorKind::UniqueViolation => {
                    DatabaseError::Duplicate(db_error.message().to_string())
                }
                _ => DatabaseError::QueryError(error.to_string()),
            },
            _ => DatabaseError::QueryError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        DatabaseError::ValidationError(format!("invalid JSON payload: {error}"))
    }
}
