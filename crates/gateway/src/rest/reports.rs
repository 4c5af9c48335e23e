use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use adpulse_database::{CreateReportRequest, Report};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX};

pub fn create_report_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/:id", get(get_report).delete(delete_report))
}

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    responses((status = 200, description = "Saved reports of the acting user, newest first", body = Vec<Report>))
)]
pub async fn list_reports(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<Vec<Report>>> {
    Ok(Json(state.reports.list_for_user(user.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "Reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report", body = Report),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_report(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Report>> {
    Ok(Json(state.reports.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "Reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report saved", body = Report),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown campaign", body = ErrorResponse)
    )
)]
pub async fn create_report(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateReportRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .required("report_type", &payload.report_type, SHORT_MAX)
        .finish()?;

    let report = state.reports.create(user.id(), &payload).await?;
    state.publish("reports", "created", report.id).await;
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "Reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_report(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.reports.delete(id).await?;
    state.publish("reports", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
