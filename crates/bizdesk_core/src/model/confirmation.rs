//! Confirmation request model.
//!
//! # Invariants
//! - At most one continuation of a request ever runs, and at most once.
//! - A request without `on_cancel` resolves cancel/dismiss silently.

use crate::notify::center::NotificationCenter;
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

/// Identity of one pending confirmation dialog.
pub type ConfirmationId = Uuid;

/// Caller-supplied continuation run when a decision is made.
///
/// It receives the owning center so it can post follow-up feedback.
pub type Continuation = Box<dyn FnOnce(&mut NotificationCenter)>;

/// Outcome reported by the presenter host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    /// User pressed the confirm action.
    Confirm,
    /// User pressed the cancel action.
    Cancel,
    /// Dialog closed without a choice (close button, backdrop, escape).
    Dismiss,
}

/// Button captions for a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmLabels {
    pub confirm: String,
    pub cancel: String,
}

impl ConfirmLabels {
    pub fn new(confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        Self {
            confirm: confirm.into(),
            cancel: cancel.into(),
        }
    }
}

/// Read-only projection handed to a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub id: ConfirmationId,
    pub message: String,
    pub labels: ConfirmLabels,
}

/// One pending yes/no decision.
pub struct ConfirmationRequest {
    pub id: ConfirmationId,
    pub message: String,
    pub labels: ConfirmLabels,
    on_confirm: Continuation,
    on_cancel: Option<Continuation>,
}

impl ConfirmationRequest {
    pub fn new(
        message: impl Into<String>,
        labels: ConfirmLabels,
        on_confirm: Continuation,
        on_cancel: Option<Continuation>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            labels,
            on_confirm,
            on_cancel,
        }
    }

    pub fn view(&self) -> ConfirmationView {
        ConfirmationView {
            id: self.id,
            message: self.message.clone(),
            labels: self.labels.clone(),
        }
    }

    pub fn has_cancel_continuation(&self) -> bool {
        self.on_cancel.is_some()
    }

    /// Consumes the request and returns the continuation matching `choice`.
    pub fn into_continuation(self, choice: ConfirmChoice) -> Option<Continuation> {
        match choice {
            ConfirmChoice::Confirm => Some(self.on_confirm),
            ConfirmChoice::Cancel | ConfirmChoice::Dismiss => self.on_cancel,
        }
    }
}

impl Debug for ConfirmationRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationRequest")
            .field("id", &self.id)
            .field("message_len", &self.message.len())
            .field("labels", &self.labels)
            .field("has_on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}
