//! Request logging, CORS and the caller identity extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderName, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::GatewayError;
use crate::state::GatewayState;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
///
/// Taken from the `x-user-id` header; requests without it act as the
/// configured default user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

impl CurrentUser {
    pub fn id(self) -> i64 {
        self.0
    }
}

#[async_trait]
impl FromRequestParts<Arc<GatewayState>> for CurrentUser {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GatewayState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentUser(state.config.auth.default_user_id));
        };

        parse_user_id(value.to_str().ok())
            .map(CurrentUser)
            .ok_or_else(|| {
                GatewayError::InvalidRequest(format!("{USER_ID_HEADER} must be a positive integer"))
            })
    }
}

fn parse_user_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Permissive CORS for the dashboard dev servers.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(USER_ID_HEADER)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_user_ids_only() {
        assert_eq!(parse_user_id(Some("7")), Some(7));
        assert_eq!(parse_user_id(Some(" 12 ")), Some(12));
        assert_eq!(parse_user_id(Some("0")), None);
        assert_eq!(parse_user_id(Some("-3")), None);
        assert_eq!(parse_user_id(Some("owner")), None);
        assert_eq!(parse_user_id(None), None);
    }
}
