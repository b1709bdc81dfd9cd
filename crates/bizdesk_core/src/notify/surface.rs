//! Rendering seams for notifications and confirmation dialogs.
//!
//! # Responsibility
//! - Define what the center asks of a DOM-like surface and a dialog host.
//! - Provide log-backed and headless implementations.
//!
//! # Invariants
//! - The center calls `mount` at most once per id, and `detach` only after
//!   `begin_exit` for the same id.
//! - Presenters receive `dispose` exactly once per presented request.

use crate::config::Anchor;
use crate::model::confirmation::{ConfirmationId, ConfirmationView};
use crate::model::notification::{NotificationId, Severity};
use crate::notify::markup::{confirmation_markup, notification_markup};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

/// Read-only projection of a notification handed to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub anchor: Anchor,
}

/// DOM-like host for the notification stack.
///
/// New elements are placed adjacent to the anchor, pushing older ones away.
pub trait NotificationSurface {
    fn mount(&mut self, view: &NotificationView);
    /// Starts the exit animation; the element stays attached.
    fn begin_exit(&mut self, id: NotificationId);
    fn detach(&mut self, id: NotificationId);
}

/// Host for blocking confirm/cancel dialogs.
pub trait ConfirmationPresenter {
    fn present(&mut self, view: &ConfirmationView);
    fn dispose(&mut self, id: ConfirmationId);
}

/// Surface that records lifecycle steps through the `log` facade.
///
/// Only metadata is logged; message text is reduced to its length.
#[derive(Debug, Default)]
pub struct LogSurface;

impl NotificationSurface for LogSurface {
    fn mount(&mut self, view: &NotificationView) {
        info!(
            "event=notification_mount module=notify status=ok id={} severity={} anchor={} message_len={}",
            view.id,
            view.severity.as_str(),
            view.anchor.as_str(),
            view.message.chars().count()
        );
    }

    fn begin_exit(&mut self, id: NotificationId) {
        info!("event=notification_exit module=notify status=ok id={id}");
    }

    fn detach(&mut self, id: NotificationId) {
        info!("event=notification_detach module=notify status=ok id={id}");
    }
}

#[derive(Debug, Default)]
pub struct LogPresenter;

impl ConfirmationPresenter for LogPresenter {
    fn present(&mut self, view: &ConfirmationView) {
        info!(
            "event=confirmation_present module=notify status=ok id={} message_len={}",
            view.id,
            view.message.chars().count()
        );
    }

    fn dispose(&mut self, id: ConfirmationId) {
        info!("event=confirmation_dispose module=notify status=ok id={id}");
    }
}

/// One observed surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Mounted {
        id: NotificationId,
        severity: Severity,
        markup: String,
    },
    ExitStarted(NotificationId),
    Detached(NotificationId),
    Presented {
        id: ConfirmationId,
        markup: String,
    },
    Disposed(ConfirmationId),
}

/// Shared, append-only record of surface calls.
pub type SurfaceLog = Rc<RefCell<Vec<SurfaceEvent>>>;

/// In-memory surface that renders markup and keeps the element stack.
///
/// `stack()` lists attached ids with the element nearest the anchor first.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    log: SurfaceLog,
    stack: Rc<RefCell<Vec<NotificationId>>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.log.borrow().clone()
    }

    pub fn stack(&self) -> Vec<NotificationId> {
        self.stack.borrow().clone()
    }
}

impl NotificationSurface for HeadlessSurface {
    fn mount(&mut self, view: &NotificationView) {
        self.stack.borrow_mut().insert(0, view.id);
        self.log.borrow_mut().push(SurfaceEvent::Mounted {
            id: view.id,
            severity: view.severity,
            markup: notification_markup(view),
        });
    }

    fn begin_exit(&mut self, id: NotificationId) {
        self.log.borrow_mut().push(SurfaceEvent::ExitStarted(id));
    }

    fn detach(&mut self, id: NotificationId) {
        self.stack.borrow_mut().retain(|attached| *attached != id);
        self.log.borrow_mut().push(SurfaceEvent::Detached(id));
    }
}

/// In-memory presenter that renders dialog markup.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    log: SurfaceLog,
    open: Rc<RefCell<Vec<ConfirmationId>>>,
    title: String,
}

impl HeadlessPresenter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Shares the event log with a surface so both record in call order.
    pub fn with_log(title: impl Into<String>, log: SurfaceLog) -> Self {
        Self {
            log,
            open: Rc::default(),
            title: title.into(),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.log.borrow().clone()
    }

    /// Dialogs currently shown, oldest first.
    pub fn open_dialogs(&self) -> Vec<ConfirmationId> {
        self.open.borrow().clone()
    }
}

impl ConfirmationPresenter for HeadlessPresenter {
    fn present(&mut self, view: &ConfirmationView) {
        self.open.borrow_mut().push(view.id);
        self.log.borrow_mut().push(SurfaceEvent::Presented {
            id: view.id,
            markup: confirmation_markup(view, &self.title),
        });
    }

    fn dispose(&mut self, id: ConfirmationId) {
        self.open.borrow_mut().retain(|open| *open != id);
        self.log.borrow_mut().push(SurfaceEvent::Disposed(id));
    }
}
