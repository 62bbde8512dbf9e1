//! Infrastructure: storage and cache collaborators.
//!
//! Business rules live in `acme-invoicing`; this crate owns the seams to
//! the outside world (Postgres, the cached listing view) plus in-memory
//! twins for dev and tests.

pub mod store;
pub mod view_cache;

pub use store::{
    CustomerDirectory, CustomerRecord, InMemoryCustomerDirectory, InMemoryInvoiceStore,
    InvoiceStore, PostgresCustomerDirectory, PostgresInvoiceStore, StoreError,
};
pub use view_cache::{InMemoryViewCache, ViewCache};
