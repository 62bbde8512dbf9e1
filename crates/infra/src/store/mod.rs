//! Invoice and customer storage seams.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use acme_core::InvoiceId;
use acme_invoicing::{Invoice, InvoiceChanges, NewInvoice};

pub use in_memory::{InMemoryCustomerDirectory, InMemoryInvoiceStore};
pub use postgres::{PostgresCustomerDirectory, PostgresInvoiceStore};

/// Storage operation error.
///
/// Carries an implementation-defined message for the operator log; callers
/// surface it to users only as a generic failure with no field attribution.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Parameterized access to the `invoices` table.
///
/// Implementations execute one bound statement per call; there is no
/// cross-call transaction. An update or delete that matches no row counts
/// as success (zero rows affected), keeping writes last-write-wins.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new row; the id is assigned by storage.
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError>;

    /// Overwrite `customer_id`, `amount_cents` and `status` of the row
    /// identified by `id`. The creation date is left unchanged.
    async fn update(&self, id: InvoiceId, changes: InvoiceChanges) -> Result<(), StoreError>;

    /// Remove the row identified by `id`.
    async fn delete(&self, id: InvoiceId) -> Result<(), StoreError>;

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// All rows, most recent date first.
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;
}

/// A customer as offered by the invoice form's selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
}

/// Read access to the customer selector options.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError>;
}
