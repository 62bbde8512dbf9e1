use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::post,
    Json, Router,
};

use acme_core::InvoiceId;
use acme_invoicing::InvoiceForm;

use crate::app::actions::{ActionOutcome, FormState, INVOICES_PATH};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", post(update_invoice).get(get_invoice))
        .route("/:id/delete", post(delete_invoice))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<InvoiceForm>,
) -> axum::response::Response {
    outcome_to_response(services.actions.create_invoice(form).await)
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceForm>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id");
        }
    };

    outcome_to_response(services.actions.update_invoice(id, form).await)
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id");
        }
    };

    match services.actions.delete_invoice(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(state) => (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response(),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id");
        }
    };

    match services.invoices.get(id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(dto::invoice_to_json(invoice))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(err) => {
            tracing::error!("database error: {err}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "failed to load invoice",
            )
        }
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.invoices.list().await {
        Ok(items) => {
            services.listing_cache.mark_fresh(INVOICES_PATH);
            let items = items.into_iter().map(dto::invoice_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(err) => {
            tracing::error!("database error: {err}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "failed to list invoices",
            )
        }
    }
}

/// Map a mutation outcome to HTTP: `303 See Other` on success, the form
/// state on failure (422 for validation, 500 for storage).
fn outcome_to_response(outcome: ActionOutcome) -> axum::response::Response {
    match outcome {
        ActionOutcome::Redirect(path) => Redirect::to(path).into_response(),
        ActionOutcome::Form(state) => form_state_response(state),
    }
}

fn form_state_response(state: FormState) -> axum::response::Response {
    let status = if state.errors.is_empty() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(state)).into_response()
}
