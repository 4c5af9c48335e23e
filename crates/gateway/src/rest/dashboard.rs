use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use adpulse_database::DashboardSummary;

use crate::error::GatewayResult;
use crate::middleware::CurrentUser;
use crate::state::GatewayState;

pub fn create_dashboard_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/dashboard/summary", get(dashboard_summary))
}

/// Headline numbers for the landing page.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses((status = 200, description = "Aggregated counts and money totals", body = DashboardSummary))
)]
pub async fn dashboard_summary(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<DashboardSummary>> {
    Ok(Json(state.dashboard.summary(user.id()).await?))
}
