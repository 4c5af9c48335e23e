//! Invoice and payment repositories for database operations.

use crate::entities::{
    CreateInvoiceRequest, CreatePaymentRequest, Invoice, InvoiceFilter, InvoiceItem,
    InvoiceStatus, InvoiceWithItems, Payment, PaymentStatus, UpdateInvoiceRequest,
    UpdatePaymentRequest,
};
use crate::types::{now_rfc3339, DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::debug;

const INVOICE_COLUMNS: &str = "id, user_id, client_id, invoice_number, status, issue_date, due_date, subtotal, tax, total, notes, created_at, updated_at";
const PAYMENT_COLUMNS: &str =
    "id, invoice_id, user_id, amount, method, status, transaction_id, paid_at, created_at";

/// Invoice numbers handed out when the caller does not supply one.
pub fn generate_invoice_number() -> String {
    let suffix: String = cuid2::create_id().chars().take(8).collect();
    format!("INV-{}", suffix.to_uppercase())
}

/// Repository for invoices and their line items
#[derive(Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &InvoiceFilter) -> DatabaseResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices
             WHERE (? IS NULL OR status = ?) AND (? IS NULL OR client_id = ?)
             ORDER BY issue_date DESC, id DESC"
        ))
        .bind(filter.status)
        .bind(filter.status)
        .bind(filter.client_id)
        .bind(filter.client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invoices)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invoice)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Invoice> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("invoice", id))
    }

    pub async fn get_with_items(&self, id: i64) -> DatabaseResult<InvoiceWithItems> {
        let invoice = self.get(id).await?;
        let items = self.items(id).await?;
        Ok(InvoiceWithItems { invoice, items })
    }

    pub async fn items(&self, invoice_id: i64) -> DatabaseResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT id, invoice_id, description, quantity, unit_price, total FROM invoice_items WHERE invoice_id = ? ORDER BY id ASC",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Insert the invoice and its items in one transaction.
    ///
    /// `subtotal` is the sum of the item line totals and `total` adds the tax.
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateInvoiceRequest,
    ) -> DatabaseResult<InvoiceWithItems> {
        let now = now_rfc3339();
        let subtotal = request.subtotal();
        let total = subtotal + request.tax;
        let invoice_number = request
            .invoice_number
            .clone()
            .unwrap_or_else(generate_invoice_number);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO invoices (user_id, client_id, invoice_number, status, issue_date, due_date, subtotal, tax, total, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(request.client_id)
        .bind(&invoice_number)
        .bind(request.status.unwrap_or(InvoiceStatus::Draft))
        .bind(&request.issue_date)
        .bind(&request.due_date)
        .bind(subtotal)
        .bind(request.tax)
        .bind(total)
        .bind(&request.notes)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        let invoice_id = result.last_insert_rowid();

        for item in &request.items {
            sqlx::query(
                "INSERT INTO invoice_items (invoice_id, description, quantity, unit_price, total) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(invoice_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(invoice_id, %invoice_number, items = request.items.len(), "invoice created");

        self.get_with_items(invoice_id).await
    }

    /// Partial update. `subtotal` and `total` keep their creation-time values.
    pub async fn update(&self, id: i64, request: &UpdateInvoiceRequest) -> DatabaseResult<Invoice> {
        let result = sqlx::query(
            "UPDATE invoices SET
                status = COALESCE(?, status),
                issue_date = COALESCE(?, issue_date),
                due_date = COALESCE(?, due_date),
                tax = COALESCE(?, tax),
                notes = COALESCE(?, notes),
                updated_at = ?
             WHERE id = ?",
        )
        .bind(request.status)
        .bind(&request.issue_date)
        .bind(&request.due_date)
        .bind(request.tax)
        .bind(&request.notes)
        .bind(now_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("invoice", id));
        }
        self.get(id).await
    }

    /// Delete an invoice and its items. Fails while payments still reference it.
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("invoice", id));
        }
        Ok(())
    }
}

/// Repository for invoice payments
#[derive(Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, invoice_id: Option<i64>) -> DatabaseResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE (? IS NULL OR invoice_id = ?) ORDER BY created_at DESC, id DESC"
        ))
        .bind(invoice_id)
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payment)
    }

    pub async fn get(&self, id: i64) -> DatabaseResult<Payment> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("payment", id))
    }

    pub async fn create(&self, user_id: i64, request: &CreatePaymentRequest) -> DatabaseResult<Payment> {
        let status = request.status.unwrap_or(PaymentStatus::Pending);
        let paid_at = match (&request.paid_at, status) {
            (Some(paid_at), _) => Some(paid_at.clone()),
            (None, PaymentStatus::Completed) => Some(now_rfc3339()),
            (None, _) => None,
        };

        let result = sqlx::query(
            "INSERT INTO payments (invoice_id, user_id, amount, method, status, transaction_id, paid_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.invoice_id)
        .bind(user_id)
        .bind(request.amount)
        .bind(&request.method)
        .bind(status)
        .bind(&request.transaction_id)
        .bind(paid_at)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, request: &UpdatePaymentRequest) -> DatabaseResult<Payment> {
        let result = sqlx::query(
            "UPDATE payments SET
                amount = COALESCE(?, amount),
                method = COALESCE(?, method),
                status = COALESCE(?, status),
                transaction_id = COALESCE(?, transaction_id),
                paid_at = COALESCE(?, paid_at)
             WHERE id = ?",
        )
        .bind(request.amount)
        .bind(&request.method)
        .bind(request.status)
        .bind(&request.transaction_id)
        .bind(&request.paid_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("payment", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("payment", id));
        }
        Ok(())
    }
}
