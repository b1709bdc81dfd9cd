//! Dashboard stats loader with last-issued-wins supersession.
//!
//! # Responsibility
//! - Fetch invoice and cost stats together for one period.
//! - Apply the result only if no newer load was issued meanwhile.
//! - Report the outcome through the view and the notification center.
//!
//! # Invariants
//! - The token is issued when `load` is called, not when it is polled.
//! - A superseded load performs no view or notification mutation.
//! - A failed load posts exactly one error notification and renders nothing.
//! - No `RefCell` borrow is held across an `.await`.

use crate::config::DashboardConfig;
use crate::dashboard::snapshot::build_snapshot;
use crate::dashboard::source::{DashboardView, StatsSource};
use crate::dashboard::token::{InFlightQuery, PeriodKey, QueryTokens};
use crate::feedback::api_error::FetchError;
use crate::notify::center::NotificationCenter;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

/// Result of one `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot rendered and success notification posted.
    Applied,
    /// Error shown and one error notification posted.
    Failed,
    /// A newer load (or `cancel`) made this result inert.
    Superseded,
}

/// Loader for one dashboard page session.
pub struct DashboardStatsLoader {
    source: Arc<dyn StatsSource>,
    view: RefCell<Box<dyn DashboardView>>,
    notifications: Rc<RefCell<NotificationCenter>>,
    config: DashboardConfig,
    tokens: QueryTokens,
}

impl DashboardStatsLoader {
    pub fn new(
        source: Arc<dyn StatsSource>,
        view: Box<dyn DashboardView>,
        notifications: Rc<RefCell<NotificationCenter>>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            source,
            view: RefCell::new(view),
            notifications,
            config,
            tokens: QueryTokens::new(),
        }
    }

    /// Starts loading `period`, superseding any load still in flight.
    ///
    /// The loading state is shown before this returns; the returned future
    /// performs the fetches and applies or discards the result.
    pub fn load(&self, period: PeriodKey) -> impl Future<Output = LoadOutcome> + '_ {
        let query = self.tokens.issue(period);
        debug!(
            "event=dashboard_load module=dashboard status=started period={} generation={}",
            period,
            query.generation()
        );
        self.view
            .borrow_mut()
            .show_loading(period, &self.config.loading_message);

        async move {
            let (invoices, costs) = tokio::join!(
                self.source.invoice_stats(period),
                self.source.cost_stats(period)
            );

            if !self.tokens.is_current(&query) {
                debug!(
                    "event=dashboard_load module=dashboard status=superseded period={} generation={}",
                    period,
                    query.generation()
                );
                return LoadOutcome::Superseded;
            }

            let (invoices, costs) = match (invoices, costs) {
                (Ok(invoices), Ok(costs)) => (invoices, costs),
                (Err(err), _) => {
                    return self.fail_fetch(&query, &err, &self.config.invoices_error_message)
                }
                (_, Err(err)) => {
                    return self.fail_fetch(&query, &err, &self.config.costs_error_message)
                }
            };

            match build_snapshot(period, &invoices, &costs, &self.config.unknown_client_label) {
                Ok(snapshot) => {
                    self.view.borrow_mut().render(&snapshot);
                    self.notifications
                        .borrow_mut()
                        .success(self.config.success_message.clone());
                    info!(
                        "event=dashboard_load module=dashboard status=ok period={} generation={}",
                        period,
                        query.generation()
                    );
                    LoadOutcome::Applied
                }
                Err(err) => {
                    warn!(
                        "event=dashboard_load module=dashboard status=error period={} cause={}",
                        period, err
                    );
                    self.fail(self.config.mismatch_error_message.clone())
                }
            }
        }
    }

    /// Makes any in-flight load inert without starting a new one.
    pub fn cancel(&self) {
        self.tokens.invalidate();
        debug!("event=dashboard_cancel module=dashboard status=ok");
    }

    fn fail_fetch(&self, query: &InFlightQuery, err: &FetchError, fallback: &str) -> LoadOutcome {
        warn!(
            "event=dashboard_load module=dashboard status=error period={} status_code={:?} cause={}",
            query.period(),
            err.status(),
            err
        );
        self.fail(err.user_message(fallback))
    }

    fn fail(&self, message: String) -> LoadOutcome {
        self.view.borrow_mut().show_error(&message);
        self.notifications.borrow_mut().error(message);
        LoadOutcome::Failed
    }
}
