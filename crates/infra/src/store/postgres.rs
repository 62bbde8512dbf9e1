//! Postgres-backed invoice storage.
//!
//! Every mutation is a single runtime-bound `sqlx::query` statement against
//! the `invoices` table; row mapping goes through `try_get` so schema drift
//! surfaces as a `StoreError` rather than a panic.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use acme_core::{CustomerId, InvoiceId};
use acme_invoicing::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};

use super::{CustomerDirectory, CustomerRecord, InvoiceStore, StoreError};

/// `InvoiceStore` over a shared `PgPool`.
///
/// The `amount` column stores minor units (cents).
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_invoice(row: &PgRow) -> Result<Invoice, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let customer_id: String = row.try_get("customer_id")?;
    let amount_cents: i64 = row.try_get("amount")?;
    let status: String = row.try_get("status")?;
    let date: NaiveDate = row.try_get("date")?;

    let status = InvoiceStatus::parse(&status)
        .ok_or_else(|| StoreError::Database(format!("unknown invoice status: {status}")))?;
    let customer_id =
        CustomerId::new(customer_id).map_err(|e| StoreError::Database(e.to_string()))?;

    Ok(Invoice {
        id: InvoiceId::from_uuid(id),
        customer_id,
        amount_cents,
        status,
        date,
    })
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(invoice.customer_id.as_str())
        .bind(invoice.amount_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await?;

        let id: Uuid = row.try_get("id")?;
        Ok(InvoiceId::from_uuid(id))
    }

    async fn update(&self, id: InvoiceId, changes: InvoiceChanges) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $1, amount = $2, status = $3
            WHERE id = $4
            "#,
        )
        .bind(changes.customer_id.as_str())
        .bind(changes.amount_cents)
        .bind(changes.status.as_str())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_invoice).transpose()
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_invoice).collect()
    }
}

/// `CustomerDirectory` over the `customers` table.
pub struct PostgresCustomerDirectory {
    pool: PgPool,
}

impl PostgresCustomerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerDirectory for PostgresCustomerDirectory {
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM customers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(CustomerRecord {
                    id: row.try_get::<Uuid, _>("id")?.to_string(),
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }
}
