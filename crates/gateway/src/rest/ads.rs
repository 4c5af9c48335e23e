//! Ad and analytics REST endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use adpulse_database::{
    Ad, Analytics, AnalyticsSummary, CreateAdRequest, CreateAnalyticsRequest, UpdateAdRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignScopeQuery {
    pub campaign_id: Option<i64>,
}

/// Create ad and analytics routes
pub fn create_ad_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/ads", get(list_ads).post(create_ad))
        .route("/ads/:id", get(get_ad).put(update_ad).delete(delete_ad))
        .route("/analytics", get(list_analytics).post(create_analytics))
        .route("/analytics/summary", get(analytics_summary))
        .route("/analytics/:id", get(get_analytics).delete(delete_analytics))
}

#[utoipa::path(
    get,
    path = "/api/ads",
    tag = "Ads",
    params(CampaignScopeQuery),
    responses((status = 200, description = "Ads", body = Vec<Ad>))
)]
pub async fn list_ads(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<CampaignScopeQuery>,
) -> GatewayResult<Json<Vec<Ad>>> {
    Ok(Json(state.ads.list(params.campaign_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/ads/{id}",
    tag = "Ads",
    params(("id" = i64, Path, description = "Ad id")),
    responses(
        (status = 200, description = "Ad", body = Ad),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_ad(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Ad>> {
    Ok(Json(state.ads.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/ads",
    tag = "Ads",
    request_body = CreateAdRequest,
    responses(
        (status = 201, description = "Ad created", body = Ad),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown campaign", body = ErrorResponse)
    )
)]
pub async fn create_ad(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateAdRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .required("content", &payload.content, TEXT_MAX)
        .required("platform", &payload.platform, SHORT_MAX)
        .optional("ad_type", payload.ad_type.as_deref(), SHORT_MAX)
        .finish()?;

    let ad = state.ads.create(&payload).await?;
    tracing::info!(ad_id = ad.id, campaign_id = ad.campaign_id, "ad created");
    state.publish("ads", "created", ad.id).await;
    Ok((StatusCode::CREATED, Json(ad)))
}

#[utoipa::path(
    put,
    path = "/api/ads/{id}",
    tag = "Ads",
    params(("id" = i64, Path, description = "Ad id")),
    request_body = UpdateAdRequest,
    responses(
        (status = 200, description = "Ad updated", body = Ad),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_ad(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAdRequest>,
) -> GatewayResult<Json<Ad>> {
    Validator::new()
        .optional("title", payload.title.as_deref(), NAME_MAX)
        .optional("content", payload.content.as_deref(), TEXT_MAX)
        .optional("platform", payload.platform.as_deref(), SHORT_MAX)
        .count("impressions", payload.impressions)
        .count("clicks", payload.clicks)
        .count("conversions", payload.conversions)
        .finish()?;

    let ad = state.ads.update(id, &payload).await?;
    state.publish("ads", "updated", id).await;
    Ok(Json(ad))
}

#[utoipa::path(
    delete,
    path = "/api/ads/{id}",
    tag = "Ads",
    params(("id" = i64, Path, description = "Ad id")),
    responses(
        (status = 204, description = "Ad deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_ad(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.ads.delete(id).await?;
    state.publish("ads", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "Analytics",
    params(CampaignScopeQuery),
    responses((status = 200, description = "Daily analytics rows, oldest first", body = Vec<Analytics>))
)]
pub async fn list_analytics(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<CampaignScopeQuery>,
) -> GatewayResult<Json<Vec<Analytics>>> {
    Ok(Json(state.analytics.list(params.campaign_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "Analytics",
    params(CampaignScopeQuery),
    responses((status = 200, description = "Totals across analytics rows", body = AnalyticsSummary))
)]
pub async fn analytics_summary(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<CampaignScopeQuery>,
) -> GatewayResult<Json<AnalyticsSummary>> {
    Ok(Json(state.analytics.summary(params.campaign_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/analytics/{id}",
    tag = "Analytics",
    params(("id" = i64, Path, description = "Analytics row id")),
    responses(
        (status = 200, description = "Analytics row", body = Analytics),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_analytics(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Analytics>> {
    Ok(Json(state.analytics.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/analytics",
    tag = "Analytics",
    request_body = CreateAnalyticsRequest,
    responses(
        (status = 201, description = "Analytics row recorded", body = Analytics),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown campaign or ad", body = ErrorResponse)
    )
)]
pub async fn create_analytics(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateAnalyticsRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("date", &payload.date, SHORT_MAX)
        .date("date", Some(&payload.date))
        .count("impressions", Some(payload.impressions))
        .count("clicks", Some(payload.clicks))
        .count("conversions", Some(payload.conversions))
        .non_negative("spend", payload.spend)
        .non_negative("revenue", payload.revenue)
        .finish()?;

    let row = state.analytics.create(&payload).await?;
    state.publish("analytics", "created", row.id).await;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/analytics/{id}",
    tag = "Analytics",
    params(("id" = i64, Path, description = "Analytics row id")),
    responses(
        (status = 204, description = "Analytics row deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_analytics(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.analytics.delete(id).await?;
    state.publish("analytics", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
