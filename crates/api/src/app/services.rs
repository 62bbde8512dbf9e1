//! Backend wiring: invoice store, customer directory, listing cache.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use acme_infra::{
    CustomerDirectory, CustomerRecord, InMemoryCustomerDirectory, InMemoryInvoiceStore,
    InMemoryViewCache, InvoiceStore, PostgresCustomerDirectory, PostgresInvoiceStore, ViewCache,
};

use crate::app::actions::InvoiceActions;

/// Wired application services: the mutation workflow plus read collaborators.
pub struct AppServices {
    pub actions: InvoiceActions,
    pub invoices: Arc<dyn InvoiceStore>,
    pub customers: Arc<dyn CustomerDirectory>,
    pub listing_cache: Arc<dyn ViewCache>,
}

impl AppServices {
    pub fn new(
        invoices: Arc<dyn InvoiceStore>,
        customers: Arc<dyn CustomerDirectory>,
        listing_cache: Arc<dyn ViewCache>,
    ) -> Self {
        Self {
            actions: InvoiceActions::new(invoices.clone(), listing_cache.clone()),
            invoices,
            customers,
            listing_cache,
        }
    }
}

/// Select backends from the environment.
///
/// `USE_PERSISTENT_STORES=true` plus `DATABASE_URL` wires Postgres;
/// anything else gets the in-memory stores (dev/test).
pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        match std::env::var("DATABASE_URL") {
            Ok(url) => return build_persistent_services(&url).await,
            Err(_) => {
                tracing::warn!(
                    "USE_PERSISTENT_STORES=true but DATABASE_URL not set, falling back to in-memory"
                );
            }
        }
    }

    build_in_memory_services()
}

fn build_in_memory_services() -> AppServices {
    // In-memory wiring (dev/test): seeded customers, empty invoices table.
    AppServices::new(
        Arc::new(InMemoryInvoiceStore::new()),
        Arc::new(InMemoryCustomerDirectory::new(seed_customers())),
        Arc::new(InMemoryViewCache::new()),
    )
}

async fn build_persistent_services(database_url: &str) -> AppServices {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to Postgres");

    AppServices::new(
        Arc::new(PostgresInvoiceStore::new(pool.clone())),
        Arc::new(PostgresCustomerDirectory::new(pool)),
        Arc::new(InMemoryViewCache::new()),
    )
}

/// Demo customers for the in-memory directory.
fn seed_customers() -> Vec<CustomerRecord> {
    ["Evergreen Supplies", "Harbor Freightworks", "Juniper Labs"]
        .into_iter()
        .map(|name| CustomerRecord {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
        })
        .collect()
}
