//! Invoicing domain module.
//!
//! This crate contains the business rules for invoice form submissions,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod form;
pub mod invoice;

pub use form::{FieldErrors, InvoiceDraft, InvoiceForm};
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
