//! Assistant chat, generated content and the templated generators.
//!
//! Generator output is persisted as `ai_generated_content` so it shows up in
//! the content library afterwards.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use adpulse_database::{
    AiChat, AiChatMessage, AiChatWithMessages, AiGeneratedContent, ChatRole,
    CreateAiChatRequest, CreateGeneratedContentRequest, GeneratedContentType,
};
use adpulse_insights::{
    AdGenerationRequest, CopywritingRequest, CopywritingResult, DesignRequest, GeneratedAd,
    GeneratedDesign,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub content: String,
}

/// The stored user message and the assistant's reply to it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatExchange {
    pub user_message: AiChatMessage,
    pub assistant_message: AiChatMessage,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContentQuery {
    pub content_type: Option<GeneratedContentType>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratedAdResponse {
    /// Id of the stored generated-content row
    pub content_id: i64,
    #[serde(flatten)]
    pub ad: GeneratedAd,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CopywritingResponse {
    pub content_id: i64,
    #[serde(flatten)]
    pub copy: CopywritingResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DesignResponse {
    pub content_id: i64,
    #[serde(flatten)]
    pub design: GeneratedDesign,
}

/// Create assistant and generator routes
pub fn create_ai_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/ai/chats", get(list_chats).post(create_chat))
        .route("/ai/chats/:id", get(get_chat).delete(delete_chat))
        .route("/ai/chats/:id/messages", post(send_message))
        .route("/ai/content", get(list_content))
        .route("/ai/content/:id", get(get_content).delete(delete_content))
        .route("/ai/ads/generate", post(generate_ad))
        .route("/ai/copywriting/generate", post(generate_copy))
        .route("/ai/designs", post(create_design))
}

#[utoipa::path(
    get,
    path = "/api/ai/chats",
    tag = "AI",
    responses((status = 200, description = "The acting user's chats, most recent first", body = Vec<AiChat>))
)]
pub async fn list_chats(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
) -> GatewayResult<Json<Vec<AiChat>>> {
    Ok(Json(state.ai_chats.list_for_user(user.id()).await?))
}

#[utoipa::path(
    post,
    path = "/api/ai/chats",
    tag = "AI",
    request_body = CreateAiChatRequest,
    responses(
        (status = 201, description = "Chat started", body = AiChat),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_chat(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateAiChatRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("title", &payload.title, NAME_MAX)
        .finish()?;

    let chat = state.ai_chats.create(user.id(), &payload).await?;
    state.publish("ai_chats", "created", chat.id).await;
    Ok((StatusCode::CREATED, Json(chat)))
}

#[utoipa::path(
    get,
    path = "/api/ai/chats/{id}",
    tag = "AI",
    params(("id" = i64, Path, description = "Chat id")),
    responses(
        (status = 200, description = "Chat with its messages", body = AiChatWithMessages),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_chat(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<AiChatWithMessages>> {
    Ok(Json(state.ai_chats.get_with_messages(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/ai/chats/{id}",
    tag = "AI",
    params(("id" = i64, Path, description = "Chat id")),
    responses(
        (status = 204, description = "Chat and its messages deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_chat(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.ai_chats.delete(id).await?;
    state.publish("ai_chats", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/ai/chats/{id}/messages",
    tag = "AI",
    params(("id" = i64, Path, description = "Chat id")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message stored with a templated assistant reply", body = ChatExchange),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn send_message(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<SendMessageRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .required("content", &payload.content, TEXT_MAX)
        .finish()?;

    let user_message = state
        .ai_chats
        .add_message(id, ChatRole::User, payload.content.trim())
        .await?;
    let reply = state.insights.chat_reply(&payload.content);
    let assistant_message = state
        .ai_chats
        .add_message(id, ChatRole::Assistant, &reply)
        .await?;

    state.publish("ai_chats", "updated", id).await;
    Ok((
        StatusCode::CREATED,
        Json(ChatExchange {
            user_message,
            assistant_message,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/ai/content",
    tag = "AI",
    params(ListContentQuery),
    responses((status = 200, description = "Stored generator output of the acting user", body = Vec<AiGeneratedContent>))
)]
pub async fn list_content(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Query(params): Query<ListContentQuery>,
) -> GatewayResult<Json<Vec<AiGeneratedContent>>> {
    Ok(Json(
        state
            .generated_content
            .list(user.id(), params.content_type)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/ai/content/{id}",
    tag = "AI",
    params(("id" = i64, Path, description = "Generated content id")),
    responses(
        (status = 200, description = "Generated content", body = AiGeneratedContent),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_content(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<AiGeneratedContent>> {
    Ok(Json(state.generated_content.get(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/ai/content/{id}",
    tag = "AI",
    params(("id" = i64, Path, description = "Generated content id")),
    responses(
        (status = 204, description = "Generated content deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_content(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.generated_content.delete(id).await?;
    state.publish("ai_content", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn store_generated(
    state: &GatewayState,
    user: CurrentUser,
    request: CreateGeneratedContentRequest,
) -> GatewayResult<AiGeneratedContent> {
    let stored = state.generated_content.create(user.id(), &request).await?;
    tracing::info!(
        content_id = stored.id,
        content_type = ?stored.content_type,
        "generated content stored"
    );
    state.publish("ai_content", "created", stored.id).await;
    Ok(stored)
}

#[utoipa::path(
    post,
    path = "/api/ai/ads/generate",
    tag = "AI",
    request_body = AdGenerationRequest,
    responses(
        (status = 201, description = "Templated ad with a placeholder image", body = GeneratedAdResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn generate_ad(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<AdGenerationRequest>,
) -> GatewayResult<impl IntoResponse> {
    let ad = state.insights.generate_ad(&payload)?;

    let stored = store_generated(
        &state,
        user,
        CreateGeneratedContentRequest {
            campaign_id: payload.campaign_id,
            content_type: GeneratedContentType::Ad,
            platform: Some(ad.platform.clone()),
            prompt: payload.product.clone(),
            content: ad.content.clone(),
            metadata: Some(serde_json::to_value(&ad)?),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(GeneratedAdResponse {
            content_id: stored.id,
            ad,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/ai/copywriting/generate",
    tag = "AI",
    request_body = CopywritingRequest,
    responses(
        (status = 201, description = "Copy variants in the requested tones", body = CopywritingResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn generate_copy(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CopywritingRequest>,
) -> GatewayResult<impl IntoResponse> {
    let copy = state.insights.generate_copy(&payload)?;
    let content = copy
        .variants
        .iter()
        .map(|variant| variant.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let stored = store_generated(
        &state,
        user,
        CreateGeneratedContentRequest {
            campaign_id: payload.campaign_id,
            content_type: GeneratedContentType::Copy,
            platform: Some(copy.platform.clone()),
            prompt: payload.product.clone(),
            content,
            metadata: Some(serde_json::to_value(&copy)?),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CopywritingResponse {
            content_id: stored.id,
            copy,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/ai/designs",
    tag = "AI",
    request_body = DesignRequest,
    responses(
        (status = 201, description = "Placeholder design at the requested size", body = DesignResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_design(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<DesignRequest>,
) -> GatewayResult<impl IntoResponse> {
    let design = state.insights.create_design(&payload)?;

    let stored = store_generated(
        &state,
        user,
        CreateGeneratedContentRequest {
            campaign_id: payload.campaign_id,
            content_type: GeneratedContentType::Design,
            platform: payload.platform.clone(),
            prompt: payload.title.clone(),
            content: design.image_url.clone(),
            metadata: Some(serde_json::to_value(&design)?),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DesignResponse {
            content_id: stored.id,
            design,
        }),
    ))
}
