//! Notification and confirmation engine.
//!
//! # Responsibility
//! - Own the active notification set and its expiry/exit timers.
//! - Mediate confirm/cancel decisions through caller continuations.
//!
//! # Invariants
//! - At most one rendered element per notification id.
//! - Dismissal is idempotent; only `Visible` notifications react to it.
//! - A confirmation runs at most one continuation, once, then its dialog is
//!   disposed.
//! - No operation returns an error; failures are presentation-only.
//!
//! Timers are cooperative: the host calls [`NotificationCenter::advance`]
//! when [`NotificationCenter::next_deadline`] is reached.

use crate::config::NotificationConfig;
use crate::model::confirmation::{
    ConfirmChoice, ConfirmLabels, ConfirmationId, ConfirmationRequest, Continuation,
};
use crate::model::notification::{
    Notification, NotificationHandle, NotificationId, NotificationPhase, Severity,
};
use crate::notify::clock::{Clock, SystemClock};
use crate::notify::surface::{ConfirmationPresenter, NotificationSurface, NotificationView};
use log::debug;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

struct Entry {
    notification: Notification,
    /// Set once the exit animation has started.
    detach_at: Option<Instant>,
}

/// Timer work performed by one [`NotificationCenter::advance_to`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub expired: usize,
    pub detached: usize,
}

/// Feedback engine for one page session.
pub struct NotificationCenter {
    config: NotificationConfig,
    clock: Box<dyn Clock>,
    surface: Box<dyn NotificationSurface>,
    presenter: Box<dyn ConfirmationPresenter>,
    /// Oldest first; the last entry sits next to the anchor.
    entries: Vec<Entry>,
    confirmations: HashMap<ConfirmationId, ConfirmationRequest>,
}

impl NotificationCenter {
    /// Creates a center driven by the system clock.
    pub fn new(
        config: NotificationConfig,
        surface: Box<dyn NotificationSurface>,
        presenter: Box<dyn ConfirmationPresenter>,
    ) -> Self {
        Self::with_clock(config, Box::new(SystemClock), surface, presenter)
    }

    pub fn with_clock(
        config: NotificationConfig,
        clock: Box<dyn Clock>,
        surface: Box<dyn NotificationSurface>,
        presenter: Box<dyn ConfirmationPresenter>,
    ) -> Self {
        Self {
            config,
            clock,
            surface,
            presenter,
            entries: Vec::new(),
            confirmations: HashMap::new(),
        }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Shows a notification and schedules auto-dismiss when `ttl > 0`.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        ttl: Duration,
    ) -> NotificationHandle {
        let mut notification = Notification::new(message, severity, ttl, self.clock.now());
        let id = notification.id;

        self.surface.mount(&NotificationView {
            id,
            message: notification.message.clone(),
            severity,
            anchor: self.config.anchor,
        });
        notification.phase = NotificationPhase::Visible;
        debug!(
            "event=notification_show module=notify status=ok id={} severity={} ttl_ms={} message_len={}",
            id,
            severity.as_str(),
            ttl.as_millis(),
            notification.message.chars().count()
        );
        self.entries.push(Entry {
            notification,
            detach_at: None,
        });

        self.enforce_visible_cap();
        NotificationHandle::new(id)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify_default(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify_default(message, Severity::Error)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify_default(message, Severity::Warning)
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationHandle {
        self.notify_default(message, Severity::Info)
    }

    /// Starts the staged removal of a notification.
    ///
    /// Returns `false` when the notification is already exiting or removed.
    pub fn dismiss(&mut self, handle: NotificationHandle) -> bool {
        let now = self.clock.now();
        self.dismiss_from(handle.id(), now)
    }

    /// Dismisses every active notification and returns how many were hit.
    pub fn clear_all(&mut self) -> usize {
        let now = self.clock.now();
        let ids: Vec<NotificationId> = self
            .entries
            .iter()
            .filter(|entry| entry.notification.phase.accepts_dismiss())
            .map(|entry| entry.notification.id)
            .collect();
        ids.into_iter()
            .filter(|id| self.dismiss_from(*id, now))
            .count()
    }

    /// Presents a confirm/cancel dialog.
    ///
    /// Continuations receive the center so they can post follow-up feedback.
    /// Without `on_cancel`, cancelling or dismissing the dialog runs nothing.
    pub fn confirm(
        &mut self,
        message: impl Into<String>,
        on_confirm: impl FnOnce(&mut NotificationCenter) + 'static,
        on_cancel: Option<Continuation>,
        labels: Option<ConfirmLabels>,
    ) -> ConfirmationId {
        let labels = labels.unwrap_or_else(|| self.config.default_labels());
        let request = ConfirmationRequest::new(message, labels, Box::new(on_confirm), on_cancel);
        let id = request.id;
        self.presenter.present(&request.view());
        debug!(
            "event=confirmation_open module=notify status=ok id={} has_on_cancel={}",
            id,
            request.has_cancel_continuation()
        );
        self.confirmations.insert(id, request);
        id
    }

    /// Future-returning form of [`Self::confirm`].
    ///
    /// Resolves `true` on confirm and `false` on cancel or dismissal. The
    /// receiver errors if the center is dropped while the dialog is open.
    pub fn confirm_decision(
        &mut self,
        message: impl Into<String>,
        labels: Option<ConfirmLabels>,
    ) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let confirm_tx = Rc::new(Cell::new(Some(tx)));
        let cancel_tx = confirm_tx.clone();
        self.confirm(
            message,
            move |_| {
                if let Some(tx) = confirm_tx.take() {
                    let _ = tx.send(true);
                }
            },
            Some(Box::new(move |_: &mut NotificationCenter| {
                if let Some(tx) = cancel_tx.take() {
                    let _ = tx.send(false);
                }
            })),
            labels,
        );
        rx
    }

    /// Applies the user's choice for a pending confirmation.
    ///
    /// Returns `false` when `id` is unknown or already resolved.
    pub fn resolve(&mut self, id: ConfirmationId, choice: ConfirmChoice) -> bool {
        let Some(request) = self.confirmations.remove(&id) else {
            debug!("event=confirmation_resolve module=notify status=ignored id={id}");
            return false;
        };
        debug!("event=confirmation_resolve module=notify status=ok id={id} choice={choice:?}");
        if let Some(continuation) = request.into_continuation(choice) {
            continuation(self);
        }
        self.presenter.dispose(id);
        true
    }

    /// Runs due timers against the center's clock.
    pub fn advance(&mut self) -> AdvanceReport {
        let now = self.clock.now();
        self.advance_to(now)
    }

    /// Expires notifications whose ttl elapsed by `now` and detaches those
    /// whose exit animation finished by `now`.
    ///
    /// Exit animations start at the expiry instant, not at `now`, so a late
    /// call catches up in one pass.
    pub fn advance_to(&mut self, now: Instant) -> AdvanceReport {
        let due: Vec<(NotificationId, Instant)> = self
            .entries
            .iter()
            .filter(|entry| entry.notification.is_active())
            .filter_map(|entry| {
                entry
                    .notification
                    .expires_at()
                    .filter(|at| *at <= now)
                    .map(|at| (entry.notification.id, at))
            })
            .collect();

        let mut report = AdvanceReport::default();
        for (id, expired_at) in due {
            if self.dismiss_from(id, expired_at) {
                report.expired += 1;
            }
        }

        let surface = &mut self.surface;
        self.entries.retain_mut(|entry| match entry.detach_at {
            Some(at) if at <= now => {
                entry.notification.phase = NotificationPhase::Removed;
                surface.detach(entry.notification.id);
                report.detached += 1;
                false
            }
            _ => true,
        });

        if report != AdvanceReport::default() {
            debug!(
                "event=notification_timers module=notify status=ok expired={} detached={}",
                report.expired, report.detached
            );
        }
        report
    }

    /// Earliest instant at which [`Self::advance_to`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter_map(|entry| match entry.notification.phase {
                NotificationPhase::Visible => entry.notification.expires_at(),
                NotificationPhase::Exiting => entry.detach_at,
                NotificationPhase::Created | NotificationPhase::Removed => None,
            })
            .min()
    }

    /// Number of notifications currently visible and not exiting.
    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.notification.is_active())
            .count()
    }

    /// Number of elements still attached, including exiting ones.
    pub fn rendered_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_active(&self, handle: NotificationHandle) -> bool {
        self.phase(handle) == NotificationPhase::Visible
    }

    /// Current phase; detached or foreign handles report `Removed`.
    pub fn phase(&self, handle: NotificationHandle) -> NotificationPhase {
        self.entry(handle.id())
            .map(|entry| entry.notification.phase)
            .unwrap_or(NotificationPhase::Removed)
    }

    /// Active notifications, the one nearest the anchor first.
    pub fn active(&self) -> Vec<&Notification> {
        self.entries
            .iter()
            .rev()
            .map(|entry| &entry.notification)
            .filter(|notification| notification.is_active())
            .collect()
    }

    pub fn pending_confirmations(&self) -> usize {
        self.confirmations.len()
    }

    fn notify_default(&mut self, message: impl Into<String>, severity: Severity) -> NotificationHandle {
        let ttl = self.config.default_ttl(severity);
        self.notify(message, severity, ttl)
    }

    fn entry(&self, id: NotificationId) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.notification.id == id)
    }

    fn dismiss_from(&mut self, id: NotificationId, started_at: Instant) -> bool {
        let exit = self.config.exit_animation();
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.notification.id == id)
        else {
            return false;
        };
        if !entry.notification.phase.accepts_dismiss() {
            return false;
        }
        entry.notification.phase = NotificationPhase::Exiting;
        entry.detach_at = Some(started_at.checked_add(exit).unwrap_or(started_at));
        self.surface.begin_exit(id);
        debug!("event=notification_dismiss module=notify status=ok id={id}");
        true
    }

    fn enforce_visible_cap(&mut self) {
        let cap = self.config.max_visible;
        if cap == 0 {
            return;
        }
        let now = self.clock.now();
        while self.active_count() > cap {
            let Some(oldest) = self
                .entries
                .iter()
                .find(|entry| entry.notification.is_active())
                .map(|entry| entry.notification.id)
            else {
                break;
            };
            self.dismiss_from(oldest, now);
        }
    }
}
