//! Data and view seams for the dashboard loader.
//!
//! # Responsibility
//! - Abstract the HTTP client that fetches aggregate stats.
//! - Abstract the page region that shows loading, charts and errors.

use crate::dashboard::snapshot::DashboardSnapshot;
use crate::dashboard::token::PeriodKey;
use crate::feedback::api_error::FetchError;
use crate::model::stats::{CostStats, InvoiceStats};
use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use std::time::Duration;

/// Backend access for the two dashboard datasets.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn invoice_stats(&self, period: PeriodKey) -> Result<InvoiceStats, FetchError>;
    async fn cost_stats(&self, period: PeriodKey) -> Result<CostStats, FetchError>;
}

/// Page region driven by the loader.
pub trait DashboardView {
    fn show_loading(&mut self, period: PeriodKey, message: &str);
    fn render(&mut self, snapshot: &DashboardSnapshot);
    fn show_error(&mut self, message: &str);
}

/// In-memory stats keyed by period, with optional simulated latency.
#[derive(Debug, Clone, Default)]
pub struct StaticStatsSource {
    invoices: HashMap<PeriodKey, InvoiceStats>,
    costs: HashMap<PeriodKey, CostStats>,
    latency: HashMap<PeriodKey, Duration>,
}

impl StaticStatsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: PeriodKey, invoices: InvoiceStats, costs: CostStats) -> Self {
        self.invoices.insert(period, invoices);
        self.costs.insert(period, costs);
        self
    }

    pub fn with_invoices(mut self, period: PeriodKey, invoices: InvoiceStats) -> Self {
        self.invoices.insert(period, invoices);
        self
    }

    pub fn with_costs(mut self, period: PeriodKey, costs: CostStats) -> Self {
        self.costs.insert(period, costs);
        self
    }

    /// Delays both responses for `period` by `latency`.
    pub fn with_latency(mut self, period: PeriodKey, latency: Duration) -> Self {
        self.latency.insert(period, latency);
        self
    }

    async fn wait(&self, period: PeriodKey) {
        if let Some(latency) = self.latency.get(&period) {
            tokio::time::sleep(*latency).await;
        }
    }
}

fn missing(period: PeriodKey, dataset: &str) -> FetchError {
    FetchError::Status {
        status: 404,
        body: serde_json::json!({
            "message": format!("No {dataset} statistics for {}.", period.label().to_lowercase())
        })
        .to_string(),
    }
}

#[async_trait]
impl StatsSource for StaticStatsSource {
    async fn invoice_stats(&self, period: PeriodKey) -> Result<InvoiceStats, FetchError> {
        self.wait(period).await;
        self.invoices
            .get(&period)
            .cloned()
            .ok_or_else(|| missing(period, "invoice"))
    }

    async fn cost_stats(&self, period: PeriodKey) -> Result<CostStats, FetchError> {
        self.wait(period).await;
        self.costs
            .get(&period)
            .cloned()
            .ok_or_else(|| missing(period, "cost"))
    }
}

/// View that reports rendered state through the `log` facade.
#[derive(Debug, Default)]
pub struct LogView;

impl DashboardView for LogView {
    fn show_loading(&mut self, period: PeriodKey, _message: &str) {
        info!("event=dashboard_loading module=dashboard status=ok period={period}");
    }

    fn render(&mut self, snapshot: &DashboardSnapshot) {
        info!(
            "event=dashboard_render module=dashboard status=ok period={} invoices={} revenue={:.2} costs={:.2} bars={} slices={}",
            snapshot.period,
            snapshot.summary.invoice_count,
            snapshot.summary.revenue_total,
            snapshot.summary.cost_total,
            snapshot.revenue_costs.labels.len(),
            snapshot.clients.labels.len()
        );
    }

    fn show_error(&mut self, message: &str) {
        info!(
            "event=dashboard_error module=dashboard status=error message_len={}",
            message.chars().count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{StaticStatsSource, StatsSource};
    use crate::dashboard::token::PeriodKey;
    use crate::model::stats::{CostStats, InvoiceStats};

    #[tokio::test]
    async fn static_source_serves_configured_period() {
        let source = StaticStatsSource::new().with_period(
            PeriodKey::Year(2024),
            InvoiceStats {
                invoice_count: 4,
                ..InvoiceStats::default()
            },
            CostStats::default(),
        );
        let invoices = source
            .invoice_stats(PeriodKey::Year(2024))
            .await
            .expect("configured period");
        assert_eq!(invoices.invoice_count, 4);
    }

    #[tokio::test]
    async fn missing_period_is_a_not_found_status() {
        let source = StaticStatsSource::new();
        let err = source
            .cost_stats(PeriodKey::Year(1999))
            .await
            .expect_err("unknown period");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message("fallback"), "No cost statistics for year 1999.");
    }
}
