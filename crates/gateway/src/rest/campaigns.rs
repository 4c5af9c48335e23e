//! Campaign REST endpoints, including the per-campaign ad and analytics views

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use adpulse_database::{
    Ad, Analytics, AnalyticsSummary, Campaign, CampaignFilter, CampaignStats, CampaignStatus,
    CreateCampaignRequest, UpdateCampaignRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCampaignsQuery {
    pub status: Option<CampaignStatus>,
    pub client_id: Option<i64>,
    /// Include archived campaigns (hidden by default)
    #[serde(default)]
    pub include_archived: bool,
}

impl From<ListCampaignsQuery> for CampaignFilter {
    fn from(query: ListCampaignsQuery) -> Self {
        Self {
            status: query.status,
            client_id: query.client_id,
            include_archived: query.include_archived,
        }
    }
}

/// Create campaign routes
pub fn create_campaign_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/stats", get(campaign_stats))
        .route(
            "/campaigns/:id",
            get(get_campaign).put(update_campaign).delete(delete_campaign),
        )
        .route("/campaigns/:id/archive", post(archive_campaign))
        .route("/campaigns/:id/ads", get(list_campaign_ads))
        .route("/campaigns/:id/analytics", get(list_campaign_analytics))
        .route("/campaigns/:id/analytics/summary", get(campaign_analytics_summary))
}

#[utoipa::path(
    get,
    path = "/api/campaigns",
    tag = "Campaigns",
    params(ListCampaignsQuery),
    responses((status = 200, description = "Campaigns, newest first", body = Vec<Campaign>))
)]
pub async fn list_campaigns(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListCampaignsQuery>,
) -> GatewayResult<Json<Vec<Campaign>>> {
    let filter = CampaignFilter::from(params);
    Ok(Json(state.campaigns.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/campaigns/stats",
    tag = "Campaigns",
    responses((status = 200, description = "Counts and budget totals over live campaigns", body = CampaignStats))
)]
pub async fn campaign_stats(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<CampaignStats>> {
    Ok(Json(state.campaigns.stats().await?))
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign", body = Campaign),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_campaign(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Campaign>> {
    Ok(Json(state.campaigns.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/campaigns",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown client", body = ErrorResponse)
    )
)]
pub async fn create_campaign(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateCampaignRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("name", &payload.name, NAME_MAX)
        .required("platform", &payload.platform, SHORT_MAX)
        .max_len("description", payload.description.as_deref().unwrap_or_default(), TEXT_MAX)
        .non_negative("budget", payload.budget)
        .date_range(
            "start_date",
            payload.start_date.as_deref(),
            "end_date",
            payload.end_date.as_deref(),
        )
        .finish()?;

    let campaign = state.campaigns.create(user.id(), &payload).await?;
    tracing::info!(campaign_id = campaign.id, platform = %campaign.platform, "campaign created");
    state.publish("campaigns", "created", campaign.id).await;
    Ok((StatusCode::CREATED, Json(campaign)))
}

#[utoipa::path(
    put,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_campaign(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> GatewayResult<Json<Campaign>> {
    let existing = state.campaigns.get(id).await?;

    // The date range is checked against whichever bound the payload leaves untouched.
    let start = payload.start_date.as_deref().or(existing.start_date.as_deref());
    let end = payload.end_date.as_deref().or(existing.end_date.as_deref());

    Validator::new()
        .optional("name", payload.name.as_deref(), NAME_MAX)
        .optional("platform", payload.platform.as_deref(), SHORT_MAX)
        .non_negative_opt("budget", payload.budget)
        .non_negative_opt("spent", payload.spent)
        .date_range("start_date", start, "end_date", end)
        .finish()?;

    let campaign = state.campaigns.update(id, &payload).await?;
    state.publish("campaigns", "updated", id).await;
    Ok(Json(campaign))
}

#[utoipa::path(
    post,
    path = "/api/campaigns/{id}/archive",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign archived", body = Campaign),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn archive_campaign(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Campaign>> {
    let campaign = state.campaigns.archive(id).await?;
    tracing::info!(campaign_id = id, "campaign archived");
    state.publish("campaigns", "archived", id).await;
    Ok(Json(campaign))
}

#[utoipa::path(
    delete,
    path = "/api/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign and its ads and analytics deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_campaign(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.campaigns.delete(id).await?;
    tracing::info!(campaign_id = id, "campaign deleted");
    state.publish("campaigns", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{id}/ads",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Ads in the campaign", body = Vec<Ad>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_campaign_ads(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Ad>>> {
    state.campaigns.get(id).await?;
    Ok(Json(state.ads.list(Some(id)).await?))
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{id}/analytics",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Daily analytics rows, oldest first", body = Vec<Analytics>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_campaign_analytics(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Analytics>>> {
    state.campaigns.get(id).await?;
    Ok(Json(state.analytics.list(Some(id)).await?))
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{id}/analytics/summary",
    tag = "Campaigns",
    params(("id" = i64, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Totals over the campaign's analytics", body = AnalyticsSummary),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn campaign_analytics_summary(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<AnalyticsSummary>> {
    state.campaigns.get(id).await?;
    Ok(Json(state.analytics.summary(Some(id)).await?))
}
