//! Decoding and validation of invoice form submissions.
//!
//! A submission arrives as named string fields; validation accumulates every
//! field failure so the form can render all messages at once, and converts
//! the accepted amount to minor units for storage.

use serde::{Deserialize, Serialize};

use acme_core::CustomerId;

use crate::invoice::InvoiceStatus;

/// Raw invoice form submission: named string fields, all optional.
///
/// Field names follow the form contract (`customerId`, `amount`, `status`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceForm {
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Per-field validation messages, in submission order.
///
/// All three keys are serialized even when empty; the form rendering layer
/// indexes into them unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(rename = "customerId")]
    pub customer_id: Vec<String>,
    pub amount: Vec<String>,
    pub status: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_empty() && self.amount.is_empty() && self.status.is_empty()
    }
}

/// A fully validated submission, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    /// Submitted whole-currency amount converted to cents. Always positive.
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Validate the submission.
    ///
    /// No field failure short-circuits the others; the caller gets the full
    /// set of messages in one pass.
    pub fn parse(self) -> Result<InvoiceDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let customer_id = self
            .customer_id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| CustomerId::new(raw).ok());
        if customer_id.is_none() {
            errors
                .customer_id
                .push("Please select a customer.".to_string());
        }

        let amount_cents = self.amount.as_deref().and_then(parse_amount_cents);
        if amount_cents.is_none() {
            errors
                .amount
                .push("Please enter an amount greater than $0.".to_string());
        }

        let status = self.status.as_deref().and_then(InvoiceStatus::parse);
        if status.is_none() {
            errors
                .status
                .push("Please select an invoice status.".to_string());
        }

        match (customer_id, amount_cents, status) {
            (Some(customer_id), Some(amount_cents), Some(status)) => Ok(InvoiceDraft {
                customer_id,
                amount_cents,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Coerce a submitted amount to cents.
///
/// Amounts are submitted in whole currency units and stored in minor units
/// to avoid floating-point rounding downstream. Only finite values strictly
/// greater than zero are accepted.
fn parse_amount_cents(raw: &str) -> Option<i64> {
    let amount: f64 = raw.trim().parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    Some((amount * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(customer: &str, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm {
            customer_id: Some(customer.to_string()),
            amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn complete_submission_is_accepted() {
        let draft = form("c1", "10", "pending").parse().unwrap();
        assert_eq!(draft.customer_id.as_str(), "c1");
        assert_eq!(draft.amount_cents, 1000);
        assert_eq!(draft.status, InvoiceStatus::Pending);
    }

    #[test]
    fn fractional_amounts_round_to_the_nearest_cent() {
        assert_eq!(form("c1", "10.55", "paid").parse().unwrap().amount_cents, 1055);
        assert_eq!(form("c1", "19.99", "paid").parse().unwrap().amount_cents, 1999);
        assert_eq!(form("c1", "0.011", "paid").parse().unwrap().amount_cents, 1);
    }

    #[test]
    fn missing_customer_reports_selection_error() {
        let submission = InvoiceForm {
            customer_id: None,
            amount: Some("10".to_string()),
            status: Some("pending".to_string()),
        };
        let errors = submission.parse().unwrap_err();
        assert_eq!(errors.customer_id, vec!["Please select a customer."]);
        assert!(errors.amount.is_empty());
        assert!(errors.status.is_empty());
    }

    #[test]
    fn blank_customer_is_treated_as_missing() {
        let errors = form("   ", "10", "pending").parse().unwrap_err();
        assert_eq!(errors.customer_id, vec!["Please select a customer."]);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in ["0", "-1", "-0.01"] {
            let errors = form("c1", amount, "pending").parse().unwrap_err();
            assert_eq!(
                errors.amount,
                vec!["Please enter an amount greater than $0."],
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_and_non_finite_amounts_are_rejected() {
        for amount in ["ten", "", "10,50", "inf", "NaN"] {
            let errors = form("c1", amount, "pending").parse().unwrap_err();
            assert!(!errors.amount.is_empty(), "amount {amount:?} should be rejected");
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let errors = form("c1", "10", "overdue").parse().unwrap_err();
        assert_eq!(errors.status, vec!["Please select an invoice status."]);
    }

    #[test]
    fn every_field_failure_is_accumulated() {
        let errors = InvoiceForm::default().parse().unwrap_err();
        assert!(!errors.customer_id.is_empty());
        assert!(!errors.amount.is_empty());
        assert!(!errors.status.is_empty());
        assert!(!errors.is_empty());
    }

    #[test]
    fn field_errors_serialize_with_form_field_names() {
        let errors = InvoiceForm::default().parse().unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json["customerId"].is_array());
        assert!(json["amount"].is_array());
        assert!(json["status"].is_array());
    }

    proptest! {
        #[test]
        fn accepted_amounts_equal_rounded_cents(cents in 1i64..=10_000_000) {
            let amount = format!("{}.{:02}", cents / 100, cents % 100);
            let draft = form("c1", &amount, "pending").parse().unwrap();
            prop_assert_eq!(draft.amount_cents, cents);
        }

        #[test]
        fn non_positive_amounts_never_validate(amount in -1_000_000.0f64..=0.0) {
            let errors = form("c1", &amount.to_string(), "pending").parse().unwrap_err();
            prop_assert!(!errors.amount.is_empty());
        }
    }
}
