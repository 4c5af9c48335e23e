//! Competitor analysis, market trends and smart targeting endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use adpulse_database::{CreateGeneratedContentRequest, CreateReportRequest, GeneratedContentType};
use adpulse_insights::{
    AudienceSegment, Competitor, CompetitorReport, CompetitorReportRequest, MarketInsight,
    MarketTrend, TargetingRecommendation, TargetingRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndustryQuery {
    pub industry: Option<String>,
}

/// Create market intelligence routes
pub fn create_insight_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/ai/competitors", get(list_competitors))
        .route("/ai/competitors/report", post(competitor_report))
        .route("/ai/market-trends", get(market_trends))
        .route("/ai/market-trends/insights", get(market_insights))
        .route("/ai/targeting/segments", get(audience_segments))
        .route("/ai/targeting/recommendations", post(targeting_recommendations))
}

#[utoipa::path(
    get,
    path = "/api/ai/competitors",
    tag = "Market intelligence",
    params(IndustryQuery),
    responses((status = 200, description = "Sample competitor profiles", body = Vec<Competitor>))
)]
pub async fn list_competitors(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<IndustryQuery>,
) -> Json<Vec<Competitor>> {
    Json(state.insights.competitors(params.industry.as_deref()))
}

#[utoipa::path(
    post,
    path = "/api/ai/competitors/report",
    tag = "Market intelligence",
    request_body = CompetitorReportRequest,
    responses(
        (status = 201, description = "Competitor report, also saved to the reports list", body = CompetitorReport),
        (status = 400, description = "No competitor matched", body = ErrorResponse)
    )
)]
pub async fn competitor_report(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CompetitorReportRequest>,
) -> GatewayResult<impl IntoResponse> {
    let report = state.insights.competitor_report(&payload)?;

    let stored = state
        .reports
        .create(
            user.id(),
            &CreateReportRequest {
                campaign_id: None,
                title: format!("Competitor analysis {}", report.id),
                report_type: "competitor_analysis".to_string(),
                data: Some(serde_json::to_value(&report)?),
            },
        )
        .await?;
    tracing::info!(report = %report.id, stored_id = stored.id, "competitor report generated");
    state.publish("reports", "created", stored.id).await;

    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/ai/market-trends",
    tag = "Market intelligence",
    params(IndustryQuery),
    responses((status = 200, description = "Trends, fastest growing first", body = Vec<MarketTrend>))
)]
pub async fn market_trends(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<IndustryQuery>,
) -> Json<Vec<MarketTrend>> {
    Json(state.insights.market_trends(params.industry.as_deref()))
}

#[utoipa::path(
    get,
    path = "/api/ai/market-trends/insights",
    tag = "Market intelligence",
    responses((status = 200, description = "Headline market insights", body = Vec<MarketInsight>))
)]
pub async fn market_insights(State(state): State<Arc<GatewayState>>) -> Json<Vec<MarketInsight>> {
    Json(state.insights.market_insights())
}

#[utoipa::path(
    get,
    path = "/api/ai/targeting/segments",
    tag = "Market intelligence",
    responses((status = 200, description = "Sample audience segments", body = Vec<AudienceSegment>))
)]
pub async fn audience_segments(
    State(state): State<Arc<GatewayState>>,
) -> Json<Vec<AudienceSegment>> {
    Json(state.insights.audience_segments())
}

#[utoipa::path(
    post,
    path = "/api/ai/targeting/recommendations",
    tag = "Market intelligence",
    request_body = TargetingRequest,
    responses(
        (status = 201, description = "Segments and budget split for the objective", body = TargetingRecommendation),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn targeting_recommendations(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<TargetingRequest>,
) -> GatewayResult<impl IntoResponse> {
    let recommendation = state.insights.targeting_recommendations(&payload)?;

    let stored = state
        .generated_content
        .create(
            user.id(),
            &CreateGeneratedContentRequest {
                campaign_id: payload.campaign_id,
                content_type: GeneratedContentType::Recommendation,
                platform: payload.platform.clone(),
                prompt: payload.objective.clone(),
                content: recommendation.tips.join("\n"),
                metadata: Some(serde_json::to_value(&recommendation)?),
            },
        )
        .await?;
    state.publish("ai_content", "created", stored.id).await;

    Ok((StatusCode::CREATED, Json(recommendation)))
}
