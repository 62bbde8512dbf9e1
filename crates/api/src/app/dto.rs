use acme_invoicing::Invoice;

/// JSON shape of a persisted invoice for the listing view.
///
/// Field names stay camelCase to match the form contract.
pub fn invoice_to_json(invoice: Invoice) -> serde_json::Value {
    serde_json::json!({
        "id": invoice.id.to_string(),
        "customerId": invoice.customer_id.as_str(),
        "amountCents": invoice.amount_cents,
        "status": invoice.status.as_str(),
        "date": invoice.date.to_string(),
    })
}
