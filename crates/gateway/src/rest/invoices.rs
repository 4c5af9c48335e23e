//! Invoice and payment REST endpoints

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
    CreateInvoiceRequest, CreatePaymentRequest, Invoice, InvoiceFilter, InvoiceStatus,
    InvoiceWithItems, Payment, UpdateInvoiceRequest, UpdatePaymentRequest,
};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::GatewayState;
use crate::validation::{Validator, NAME_MAX, SHORT_MAX, TEXT_MAX};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInvoicesQuery {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPaymentsQuery {
    pub invoice_id: Option<i64>,
}

/// Create invoice and payment routes
pub fn create_invoice_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/invoices/:id/payments", get(list_invoice_payments))
        .route("/payments", get(list_payments).post(create_payment))
        .route(
            "/payments/:id",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    params(ListInvoicesQuery),
    responses((status = 200, description = "Invoices, newest first", body = Vec<Invoice>))
)]
pub async fn list_invoices(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListInvoicesQuery>,
) -> GatewayResult<Json<Vec<Invoice>>> {
    let filter = InvoiceFilter {
        status: params.status,
        client_id: params.client_id,
    };
    Ok(Json(state.invoices.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice with its line items", body = InvoiceWithItems),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_invoice(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<InvoiceWithItems>> {
    Ok(Json(state.invoices.get_with_items(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created; subtotal and total derived from the items", body = InvoiceWithItems),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown client or duplicate invoice number", body = ErrorResponse)
    )
)]
pub async fn create_invoice(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreateInvoiceRequest>,
) -> GatewayResult<impl IntoResponse> {
    let mut validator = Validator::new();
    validator
        .optional("invoice_number", payload.invoice_number.as_deref(), SHORT_MAX)
        .date_range(
            "issue_date",
            Some(&payload.issue_date),
            "due_date",
            Some(&payload.due_date),
        )
        .non_negative("tax", payload.tax)
        .max_len("notes", payload.notes.as_deref().unwrap_or_default(), TEXT_MAX);
    for (index, item) in payload.items.iter().enumerate() {
        validator
            .required(&format!("items[{index}].description"), &item.description, NAME_MAX)
            .non_negative(&format!("items[{index}].quantity"), item.quantity)
            .non_negative(&format!("items[{index}].unit_price"), item.unit_price);
    }
    validator.finish()?;

    let invoice = state.invoices.create(user.id(), &payload).await?;
    tracing::info!(
        invoice_id = invoice.invoice.id,
        invoice_number = %invoice.invoice.invoice_number,
        total = invoice.invoice.total,
        "invoice created"
    );
    state.publish("invoices", "created", invoice.invoice.id).await;
    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated", body = Invoice),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_invoice(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> GatewayResult<Json<Invoice>> {
    let existing = state.invoices.get(id).await?;
    let issue = payload.issue_date.as_deref().unwrap_or(&existing.issue_date);
    let due = payload.due_date.as_deref().unwrap_or(&existing.due_date);

    Validator::new()
        .date_range("issue_date", Some(issue), "due_date", Some(due))
        .non_negative_opt("tax", payload.tax)
        .finish()?;

    let invoice = state.invoices.update(id, &payload).await?;
    state.publish("invoices", "updated", id).await;
    Ok(Json(invoice))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 204, description = "Invoice and its items deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Invoice has recorded payments", body = ErrorResponse)
    )
)]
pub async fn delete_invoice(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.invoices.delete(id).await?;
    state.publish("invoices", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}/payments",
    tag = "Invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Payments against the invoice", body = Vec<Payment>),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_invoice_payments(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Vec<Payment>>> {
    state.invoices.get(id).await?;
    Ok(Json(state.payments.list(Some(id)).await?))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    params(ListPaymentsQuery),
    responses((status = 200, description = "Payments, newest first", body = Vec<Payment>))
)]
pub async fn list_payments(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListPaymentsQuery>,
) -> GatewayResult<Json<Vec<Payment>>> {
    Ok(Json(state.payments.list(params.invoice_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_payment(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<Json<Payment>> {
    Ok(Json(state.payments.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Unknown invoice", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    State(state): State<Arc<GatewayState>>,
    user: CurrentUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> GatewayResult<impl IntoResponse> {
    Validator::new()
        .non_negative("amount", payload.amount)
        .required("method", &payload.method, SHORT_MAX)
        .optional("transaction_id", payload.transaction_id.as_deref(), NAME_MAX)
        .date("paid_at", payload.paid_at.as_deref())
        .finish()?;

    let payment = state.payments.create(user.id(), &payload).await?;
    tracing::info!(
        payment_id = payment.id,
        invoice_id = payment.invoice_id,
        amount = payment.amount,
        "payment recorded"
    );
    state.publish("payments", "created", payment.id).await;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = i64, Path, description = "Payment id")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_payment(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> GatewayResult<Json<Payment>> {
    Validator::new()
        .non_negative_opt("amount", payload.amount)
        .optional("method", payload.method.as_deref(), SHORT_MAX)
        .date("paid_at", payload.paid_at.as_deref())
        .finish()?;

    let payment = state.payments.update(id, &payload).await?;
    state.publish("payments", "updated", id).await;
    Ok(Json(payment))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_payment(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state.payments.delete(id).await?;
    state.publish("payments", "deleted", id).await;
    Ok(StatusCode::NO_CONTENT)
}
