//! Invoice form actions: validate, persist, invalidate, redirect.
//!
//! The success path of create/update hands control back to the client via
//! [`ActionOutcome::Redirect`]; nothing in the workflow runs after that
//! value is produced. Failures come back as a [`FormState`] for the form to
//! re-render. Storage failures are logged for operators; validation
//! failures never are.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use acme_core::InvoiceId;
use acme_infra::{InvoiceStore, StoreError, ViewCache};
use acme_invoicing::{FieldErrors, InvoiceChanges, InvoiceForm, NewInvoice};

/// Logical path of the invoice listing view (cache key and redirect target).
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Form-facing result of a mutation attempt.
///
/// Constructed fresh per request, never persisted. On validation failure
/// the field lists carry the messages; on storage failure they stay empty
/// and only the generic message is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub message: Option<String>,
    pub errors: FieldErrors,
}

/// What the HTTP layer should do after a create/update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Navigate the user to the given path; the workflow is finished.
    Redirect(&'static str),
    /// Re-render the form with the given state.
    Form(FormState),
}

/// Invoice mutation workflow over the storage and cache collaborators.
///
/// Each call is an independent, stateless request-response unit; the only
/// suspension points are the storage round-trips.
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn ViewCache>,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>) -> Self {
        Self { store, cache }
    }

    /// Validate and insert a new invoice.
    ///
    /// The creation date is the server's current calendar date; the id is
    /// assigned by storage.
    pub async fn create_invoice(&self, form: InvoiceForm) -> ActionOutcome {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                return ActionOutcome::Form(FormState {
                    message: Some("Missing Fields. Failed to Create Invoice.".to_string()),
                    errors,
                });
            }
        };

        let invoice = NewInvoice {
            customer_id: draft.customer_id,
            amount_cents: draft.amount_cents,
            status: draft.status,
            date: Utc::now().date_naive(),
        };

        if let Err(err) = self.store.insert(invoice).await {
            return ActionOutcome::Form(storage_failure(
                err,
                "Database Error: Failed to Create Invoice.",
            ));
        }

        self.cache.invalidate(INVOICES_PATH);
        ActionOutcome::Redirect(INVOICES_PATH)
    }

    /// Validate and overwrite an existing invoice.
    ///
    /// Only `customer_id`, `amount_cents` and `status` are written; the
    /// creation date stays as it was. An id matching no row is not an error
    /// (last-write-wins, no version check).
    pub async fn update_invoice(&self, id: InvoiceId, form: InvoiceForm) -> ActionOutcome {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                return ActionOutcome::Form(FormState {
                    message: Some("Missing Fields. Failed to Update Invoice.".to_string()),
                    errors,
                });
            }
        };

        let changes = InvoiceChanges {
            customer_id: draft.customer_id,
            amount_cents: draft.amount_cents,
            status: draft.status,
        };

        if let Err(err) = self.store.update(id, changes).await {
            return ActionOutcome::Form(storage_failure(
                err,
                "Database Error: Failed to Update Invoice.",
            ));
        }

        self.cache.invalidate(INVOICES_PATH);
        ActionOutcome::Redirect(INVOICES_PATH)
    }

    /// Remove an invoice.
    ///
    /// Success invalidates the listing cache but does not navigate anywhere.
    pub async fn delete_invoice(&self, id: InvoiceId) -> Result<(), FormState> {
        if let Err(err) = self.store.delete(id).await {
            // Clients match on this exact string; it has always been the
            // create-path text. TODO(billing): coordinate a client release
            // before correcting it to a delete-specific message.
            return Err(storage_failure(
                err,
                "Database Error: Failed to Create Invoice.",
            ));
        }

        self.cache.invalidate(INVOICES_PATH);
        Ok(())
    }
}

/// A storage failure is logged for operators and surfaced to the user only
/// as a generic message with no field attribution.
fn storage_failure(err: StoreError, message: &'static str) -> FormState {
    tracing::error!("database error: {err}");
    FormState {
        message: Some(message.to_string()),
        errors: FieldErrors::default(),
    }
}
