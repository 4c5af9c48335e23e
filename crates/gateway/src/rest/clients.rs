//! Client REST endpoints

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
    Campaign, Client, ClientStatus, CreateClientRequest, Invoice, InvoiceFilter,
    UpdateClientRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListClientsQuery {
    pub status: Option<ClientStatus>,
}

/// Create client routes
pub fn create_client_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/clients/:id/campaigns", get(list_client_campaigns))
        .route("/clients/:id/invoices", get(list_client_invoices))
}

fn validate_contact(
    validator: &mut Validator,
    email: Option<&str>,
    phone: Option<&str>,
    notes: Option<&str>,
) {
    validator
        .email("email", email.filter(|e| !e.trim().is_empty()))
        .optional("phone", phone, SHORT_MAX)
        .max_len("notes", notes.unwrap_or_default(), TEXT_MAX);
}

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ListClientsQuery),
    responses((status = 200, description = "Clients, newest first", body = Vec<Client>))
)]
pub async fn list_clients(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListClientsQuery>,
) -> GatewayResult<Json<Vec<Client>>> {
    Ok(Json(state.clients.list(params.status).await?))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_client(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Client>> {
    Ok(Json(state.clients.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_client(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateClientRequest>,
) -> GatewayResult<impl IntoResponse> {
    let mut validator = Validator::new();
    validator.required("name", &payload.name, NAME_MAX);
    validate_contact(
        &mut validator,
        payload.email.as_deref(),
        payload.phone.as_deref(),
        payload.notes.as_deref(),
    );
    validator.finish()?;

    let client = state.clients.create(user.id(), &payload).await?;
    tracing::info!(client_id = client.id, "client created");
    state.publish("clients", "created", client.id).await;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client id")),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_client(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateClientRequest>,
) -> GatewayResult<Json<Client>> {
    let mut validator = Validator::new();
    validator.optional("name", payload.name.as_deref(), NAME_MAX);
    validate_contact(
        &mut validator,
        payload.email.as_deref(),
        payload.phone.as_deref(),
        payload.notes.as_deref(),
    );
    validator.finish()?;

    let client = state.clients.update(id, &payload).await?;
    state.publish("clients", "updated", id).await;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Client still has invoices", body = ErrorResponse)
    )
)]
pub async fn delete_client(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.clients.delete(id).await?;
    tracing::info!(client_id = id, "client deleted");
    state.publish("clients", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/campaigns",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "Campaigns run for the client, archived included", body = Vec<Campaign>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_client_campaigns(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Campaign>>> {
    state.clients.get(id).await?;
    Ok(Json(state.campaigns.list_by_client(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/invoices",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client id")),
    responses(
        (status = 200, description = "Invoices billed to the client", body = Vec<Invoice>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_client_invoices(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Invoice>>> {
    state.clients.get(id).await?;
    let filter = InvoiceFilter {
        client_id: Some(id),
        ..Default::default()
    };
    Ok(Json(state.invoices.list(&filter).await?))
}
