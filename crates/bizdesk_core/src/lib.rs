//! Interaction core for the bizdesk client/invoice/cost manager.
//! This crate owns field validation, user feedback and dashboard loading.

pub mod config;
pub mod dashboard;
pub mod feedback;
pub mod logging;
pub mod model;
pub mod notify;
pub mod validation;

pub use config::{Anchor, ConfigError, CoreConfig, DashboardConfig, NotificationConfig};
pub use dashboard::loader::{DashboardStatsLoader, LoadOutcome};
pub use dashboard::snapshot::{build_snapshot, DashboardSnapshot, SnapshotError};
pub use dashboard::source::{DashboardView, LogView, StaticStatsSource, StatsSource};
pub use dashboard::token::{InFlightQuery, InvalidPeriod, PeriodKey, QueryTokens};
pub use feedback::api_error::{describe_failure, FetchError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::confirmation::{ConfirmChoice, ConfirmLabels, ConfirmationId, Continuation};
pub use model::notification::{NotificationHandle, NotificationId, NotificationPhase, Severity};
pub use model::stats::{ClientCount, CostStats, InvoiceStats, PeriodTotal};
pub use notify::center::{AdvanceReport, NotificationCenter};
pub use notify::clock::{Clock, ManualClock, SystemClock};
pub use notify::surface::{
    ConfirmationPresenter, HeadlessPresenter, HeadlessSurface, LogPresenter, LogSurface,
    NotificationSurface, SurfaceEvent,
};
pub use validation::forms::{
    validate_client_draft, validate_cost_draft, validate_invoice_draft, ClientDraft, CostDraft,
    FormIssue, InvoiceDraft,
};
pub use validation::tax_code::{
    check_character, is_valid_tax_code, validate_tax_code, TaxCode, TaxCodeError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
