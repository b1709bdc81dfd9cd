//! Notification domain model.
//!
//! # Responsibility
//! - Define the transient feedback record owned by `NotificationCenter`.
//! - Keep lifecycle transitions explicit and one-way.
//!
//! # Invariants
//! - `id` is unique for the lifetime of one center and never reused.
//! - `Removed` is terminal; no transition leaves it.
//! - A zero `ttl` means the notification persists until dismissed.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Opaque identity of one rendered notification.
pub type NotificationId = Uuid;

/// Visual and semantic category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Stable lowercase name used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Alert style class suffix used by HTML surfaces.
    ///
    /// Errors map to `danger` to match the stylesheet naming.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Lifecycle phase of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    /// Registered but not yet mounted on the surface.
    Created,
    /// Mounted and counted as active.
    Visible,
    /// Exit animation running; no longer active, still attached.
    Exiting,
    /// Detached from the surface. Terminal.
    Removed,
}

impl NotificationPhase {
    /// Returns whether a dismiss request should still act on this phase.
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Self::Created | Self::Visible)
    }
}

/// One transient feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Auto-dismiss delay. `Duration::ZERO` disables expiry.
    pub ttl: Duration,
    pub created_at: Instant,
    pub phase: NotificationPhase,
}

impl Notification {
    /// Creates a notification in `Created` phase with a fresh identity.
    pub fn new(
        message: impl Into<String>,
        severity: Severity,
        ttl: Duration,
        created_at: Instant,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            ttl,
            created_at,
            phase: NotificationPhase::Created,
        }
    }

    /// Deadline for auto-dismiss, or `None` when the notification persists.
    ///
    /// A ttl too large to represent as an instant also persists.
    pub fn expires_at(&self) -> Option<Instant> {
        if self.ttl.is_zero() {
            None
        } else {
            self.created_at.checked_add(self.ttl)
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == NotificationPhase::Visible
    }
}

/// Caller-facing handle for early dismissal.
///
/// Handles are plain copies of the identity; holding one does not keep the
/// notification alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle {
    id: NotificationId,
}

impl NotificationHandle {
    pub(crate) fn new(id: NotificationId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationPhase, Severity};
    use std::time::{Duration, Instant};

    #[test]
    fn zero_ttl_never_expires() {
        let notification = Notification::new("saved", Severity::Info, Duration::ZERO, Instant::now());
        assert!(notification.expires_at().is_none());
    }

    #[test]
    fn expiry_is_created_at_plus_ttl() {
        let now = Instant::now();
        let notification = Notification::new("saved", Severity::Success, Duration::from_millis(5000), now);
        assert_eq!(
            notification.expires_at(),
            Some(now + Duration::from_millis(5000))
        );
    }

    #[test]
    fn unrepresentable_ttl_never_expires() {
        let notification = Notification::new("saved", Severity::Info, Duration::MAX, Instant::now());
        assert!(notification.expires_at().is_none());
    }

    #[test]
    fn only_created_and_visible_accept_dismiss() {
        assert!(NotificationPhase::Created.accepts_dismiss());
        assert!(NotificationPhase::Visible.accepts_dismiss());
        assert!(!NotificationPhase::Exiting.accepts_dismiss());
        assert!(!NotificationPhase::Removed.accepts_dismiss());
    }

    #[test]
    fn error_severity_uses_danger_style() {
        assert_eq!(Severity::Error.style_class(), "danger");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}
