//! In-memory storage twins for dev and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use acme_core::InvoiceId;
use acme_invoicing::{Invoice, InvoiceChanges, NewInvoice};

use super::{CustomerDirectory, CustomerRecord, InvoiceStore, StoreError};

/// `InvoiceStore` backed by a mutex-guarded map.
///
/// Mirrors the Postgres implementation's semantics: ids are minted on
/// insert, and updates/deletes that match no row are successful no-ops.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    rows: Mutex<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError> {
        let id = InvoiceId::new();
        let row = Invoice {
            id,
            customer_id: invoice.customer_id,
            amount_cents: invoice.amount_cents,
            status: invoice.status,
            date: invoice.date,
        };
        self.rows.lock().unwrap().insert(id, row);
        Ok(id)
    }

    async fn update(&self, id: InvoiceId, changes: InvoiceChanges) -> Result<(), StoreError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.customer_id = changes.customer_id;
            row.amount_cents = changes.amount_cents;
            row.status = changes.status;
        }
        Ok(())
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), StoreError> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let mut rows: Vec<Invoice> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

/// Fixed customer list for dev and tests.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: Vec<CustomerRecord>,
}

impl InMemoryCustomerDirectory {
    pub fn new(customers: Vec<CustomerRecord>) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn list(&self) -> Result<Vec<CustomerRecord>, StoreError> {
        Ok(self.customers.clone())
    }
}
