//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use adpulse_database::DatabaseError;
use adpulse_insights::InsightsError;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::DatabaseError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status.as_str().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<DatabaseError> for GatewayError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(what) => GatewayError::NotFound(what),
            DatabaseError::ConstraintViolation(msg) => GatewayError::Conflict(format!(
                "operation violates a reference between records ({msg})"
            )),
            DatabaseError::Duplicate(msg) => GatewayError::Conflict(msg),
            DatabaseError::ValidationError(msg) => GatewayError::InvalidRequest(msg),
            other => GatewayError::DatabaseError(other.to_string()),
        }
    }
}

impl From<InsightsError> for GatewayError {
    fn from(error: InsightsError) -> Self {
        GatewayError::InvalidRequest(error.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        GatewayError::InternalError(format!("JSON serialization error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_map_to_http_statuses() {
        let cases = [
            (DatabaseError::not_found("campaign", 4), StatusCode::NOT_FOUND),
            (
                DatabaseError::ConstraintViolation("FOREIGN KEY constraint failed".into()),
                StatusCode::CONFLICT,
            ),
            (DatabaseError::Duplicate("users.email".into()), StatusCode::CONFLICT),
            (DatabaseError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (DatabaseError::QueryError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(GatewayError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn insights_errors_are_bad_requests() {
        let error = GatewayError::from(InsightsError::MissingField { field: "product" });
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().contains("product"));
    }
}
