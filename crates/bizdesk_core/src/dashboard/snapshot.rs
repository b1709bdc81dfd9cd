//! Shapes the two stats payloads into what the dashboard renders.
//!
//! # Responsibility
//! - Build summary cards and chart series from one invoice/cost pair.
//! - Align cost totals to revenue labels so bars line up by period.
//!
//! # Invariants
//! - Both series of the grouped bar chart have the same length as `labels`.
//! - Payloads that refer to different years never produce a snapshot.

use crate::dashboard::token::PeriodKey;
use crate::model::stats::{CostStats, InvoiceStats};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub period_label: String,
    pub invoice_count: u64,
    pub revenue_total: f64,
    pub cost_total: f64,
    pub invoiced_clients: u64,
}

/// Grouped bar chart: revenue vs costs per period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueCostChart {
    pub title: String,
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub costs: Vec<f64>,
}

/// Pie chart: invoice count per client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientShareChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Everything one successful load renders, applied as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub period: PeriodKey,
    pub summary: SummaryCards,
    pub revenue_costs: RevenueCostChart,
    pub clients: ClientShareChart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    PeriodMismatch {
        invoices: Option<i32>,
        costs: Option<i32>,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PeriodMismatch { invoices, costs } => write!(
                f,
                "invoice and cost statistics refer to different periods ({invoices:?} vs {costs:?})"
            ),
        }
    }
}

impl Error for SnapshotError {}

/// Builds the dashboard snapshot for `period`.
///
/// # Errors
/// - `PeriodMismatch` when both payloads name a selected year and the years
///   differ.
pub fn build_snapshot(
    period: PeriodKey,
    invoices: &InvoiceStats,
    costs: &CostStats,
    unknown_client_label: &str,
) -> Result<DashboardSnapshot, SnapshotError> {
    if let (Some(invoice_year), Some(cost_year)) = (invoices.selected_year, costs.selected_year) {
        if invoice_year != cost_year {
            return Err(SnapshotError::PeriodMismatch {
                invoices: invoices.selected_year,
                costs: costs.selected_year,
            });
        }
    }

    let selected_year = invoices.selected_year.or(period.year());
    Ok(DashboardSnapshot {
        period,
        summary: SummaryCards {
            period_label: period.label(),
            invoice_count: invoices.invoice_count,
            revenue_total: invoices.yearly_total,
            cost_total: costs.yearly_total,
            invoiced_clients: invoices.invoiced_clients,
        },
        revenue_costs: revenue_cost_chart(selected_year, invoices, costs),
        clients: client_share_chart(invoices, unknown_client_label),
    })
}

fn period_label(selected_year: Option<i32>, period: i32) -> String {
    match selected_year {
        Some(_) => usize::try_from(period)
            .ok()
            .and_then(|month| month.checked_sub(1))
            .and_then(|index| MONTH_LABELS.get(index))
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| format!("Month {period}")),
        None => period.to_string(),
    }
}

fn revenue_cost_chart(
    selected_year: Option<i32>,
    invoices: &InvoiceStats,
    costs: &CostStats,
) -> RevenueCostChart {
    let cost_by_period: HashMap<i32, f64> = costs
        .per_period
        .iter()
        .map(|row| (row.period, row.total))
        .collect();

    let labels = invoices
        .per_period
        .iter()
        .map(|row| period_label(selected_year, row.period))
        .collect();
    let revenue = invoices.per_period.iter().map(|row| row.total).collect();
    let costs = invoices
        .per_period
        .iter()
        .map(|row| cost_by_period.get(&row.period).copied().unwrap_or(0.0))
        .collect();

    let title = match selected_year {
        Some(year) => format!("Revenue and costs by month - {year}"),
        None => "Revenue and costs by year".to_string(),
    };

    RevenueCostChart {
        title,
        labels,
        revenue,
        costs,
    }
}

fn client_share_chart(invoices: &InvoiceStats, unknown_client_label: &str) -> ClientShareChart {
    let labels = invoices
        .per_client
        .iter()
        .map(|row| match row.client_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => unknown_client_label.to_string(),
        })
        .collect();
    let values = invoices.per_client.iter().map(|row| row.count).collect();
    ClientShareChart {
        title: "Invoices by client".to_string(),
        labels,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_snapshot, SnapshotError};
    use crate::dashboard::token::PeriodKey;
    use crate::model::stats::{ClientCount, CostStats, InvoiceStats, PeriodTotal};

    fn rows(pairs: &[(i32, f64)]) -> Vec<PeriodTotal> {
        pairs
            .iter()
            .map(|(period, total)| PeriodTotal {
                period: *period,
                total: *total,
            })
            .collect()
    }

    #[test]
    fn costs_align_to_revenue_months() {
        let invoices = InvoiceStats {
            selected_year: Some(2024),
            per_period: rows(&[(1, 100.0), (3, 300.0), (13, 5.0)]),
            ..InvoiceStats::default()
        };
        let costs = CostStats {
            selected_year: Some(2024),
            per_period: rows(&[(3, 30.0), (2, 20.0)]),
            ..CostStats::default()
        };
        let snapshot =
            build_snapshot(PeriodKey::Year(2024), &invoices, &costs, "Unknown").expect("snapshot");
        let chart = snapshot.revenue_costs;
        assert_eq!(chart.labels, vec!["Jan", "Mar", "Month 13"]);
        assert_eq!(chart.revenue, vec![100.0, 300.0, 5.0]);
        assert_eq!(chart.costs, vec![0.0, 30.0, 0.0]);
        assert_eq!(chart.title, "Revenue and costs by month - 2024");
    }

    #[test]
    fn all_years_uses_year_labels() {
        let invoices = InvoiceStats {
            per_period: rows(&[(2023, 10.0), (2024, 20.0)]),
            ..InvoiceStats::default()
        };
        let costs = CostStats {
            per_period: rows(&[(2024, 5.0)]),
            ..CostStats::default()
        };
        let snapshot = build_snapshot(PeriodKey::All, &invoices, &costs, "Unknown").expect("snapshot");
        assert_eq!(snapshot.revenue_costs.labels, vec!["2023", "2024"]);
        assert_eq!(snapshot.revenue_costs.costs, vec![0.0, 5.0]);
        assert_eq!(snapshot.summary.period_label, "All years");
    }

    #[test]
    fn unnamed_clients_get_fallback_label() {
        let invoices = InvoiceStats {
            per_client: vec![
                ClientCount {
                    client_name: Some("Mario Rossi".to_string()),
                    count: 3,
                },
                ClientCount {
                    client_name: Some("  ".to_string()),
                    count: 1,
                },
                ClientCount {
                    client_name: None,
                    count: 2,
                },
            ],
            ..InvoiceStats::default()
        };
        let snapshot =
            build_snapshot(PeriodKey::All, &invoices, &CostStats::default(), "Unknown client")
                .expect("snapshot");
        assert_eq!(
            snapshot.clients.labels,
            vec!["Mario Rossi", "Unknown client", "Unknown client"]
        );
        assert_eq!(snapshot.clients.values, vec![3, 1, 2]);
    }

    #[test]
    fn mismatched_years_are_rejected() {
        let invoices = InvoiceStats {
            selected_year: Some(2024),
            ..InvoiceStats::default()
        };
        let costs = CostStats {
            selected_year: Some(2025),
            ..CostStats::default()
        };
        let err = build_snapshot(PeriodKey::Year(2024), &invoices, &costs, "Unknown")
            .expect_err("mismatch must fail");
        assert_eq!(
            err,
            SnapshotError::PeriodMismatch {
                invoices: Some(2024),
                costs: Some(2025)
            }
        );
    }
}
