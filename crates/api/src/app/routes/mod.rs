use axum::Router;

pub mod customers;
pub mod invoices;
pub mod system;

/// Router for all dashboard endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/dashboard/invoices", invoices::router())
        .nest("/dashboard/customers", customers::router())
}
