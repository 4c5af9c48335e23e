//! Invoice, invoice item and payment entity definitions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Invoice {
    pub id: i64,
    pub user_id: i64,
    pub client_id: i64,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub issue_date: String,
    pub due_date: String,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// An invoice together with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceWithItems {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInvoiceItemRequest {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    pub unit_price: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl CreateInvoiceItemRequest {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub client_id: i64,
    /// Generated when omitted.
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    pub issue_date: String,
    pub due_date: String,
    #[serde(default)]
    pub tax: f64,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<CreateInvoiceItemRequest>,
}

impl CreateInvoiceRequest {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CreateInvoiceItemRequest::line_total).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateInvoiceRequest {
    pub status: Option<InvoiceStatus>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub tax: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub invoice_id: i64,
    pub amount: f64,
    pub method: String,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}
