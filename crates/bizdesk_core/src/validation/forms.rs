//! Submit-time checks for CRUD form drafts.
//!
//! # Responsibility
//! - Turn a form draft into the first blocking issue, if any.
//! - Attach the severity and message the form flow surfaces to the user.
//!
//! # Invariants
//! - Checks run in field order and stop at the first issue.
//! - Text fields are trimmed before emptiness checks.

use crate::model::notification::Severity;
use crate::validation::tax_code::is_valid_tax_code;

/// First blocking problem found in a form draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIssue {
    /// Form field name that should receive focus.
    pub field: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl FormIssue {
    fn new(field: &'static str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            field,
            severity,
            message: message.into(),
        }
    }
}

/// Client add/edit form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    pub tax_code: String,
}

/// Cost add/edit form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostDraft {
    pub description: String,
    pub payment_date: String,
    /// Raw amount as typed; parsed during validation.
    pub total: String,
}

/// Invoice form contents relevant to submit-time checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub client_id: Option<String>,
}

/// Checks a client draft: tax code first, then first and last name.
pub fn validate_client_draft(draft: &ClientDraft) -> Result<(), FormIssue> {
    if !is_valid_tax_code(&draft.tax_code) {
        return Err(FormIssue::new(
            "tax_code",
            Severity::Warning,
            "The tax code is not valid. Check the format and try again.",
        ));
    }
    if draft.first_name.trim().is_empty() {
        return Err(FormIssue::new(
            "first_name",
            Severity::Error,
            "First name is required.",
        ));
    }
    if draft.last_name.trim().is_empty() {
        return Err(FormIssue::new(
            "last_name",
            Severity::Error,
            "Last name is required.",
        ));
    }
    Ok(())
}

/// Checks a cost draft and returns the parsed positive total.
pub fn validate_cost_draft(draft: &CostDraft) -> Result<f64, FormIssue> {
    if draft.description.trim().is_empty() {
        return Err(FormIssue::new(
            "description",
            Severity::Warning,
            "A description is required.",
        ));
    }
    if draft.payment_date.trim().is_empty() {
        return Err(FormIssue::new(
            "payment_date",
            Severity::Warning,
            "A payment date is required.",
        ));
    }
    match draft.total.trim().replace(',', ".").parse::<f64>() {
        Ok(total) if total.is_finite() && total > 0.0 => Ok(total),
        _ => Err(FormIssue::new(
            "total",
            Severity::Warning,
            "The total must be a positive number.",
        )),
    }
}

/// Checks an invoice draft has a client selected.
pub fn validate_invoice_draft(draft: &InvoiceDraft) -> Result<(), FormIssue> {
    match draft.client_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(FormIssue::new(
            "client_id",
            Severity::Warning,
            "Select a client to proceed.",
        )),
    }
}
