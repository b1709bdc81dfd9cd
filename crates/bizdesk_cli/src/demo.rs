//! Sample dashboard data and a stdout view for `bizdesk demo dashboard`.

use crate::{report_error, OutputFormat};
use bizdesk_core::{
    ClientCount, CostStats, DashboardSnapshot, DashboardView, InvoiceStats, PeriodKey,
    PeriodTotal, StaticStatsSource,
};
use std::time::Duration;

const SAMPLE_LATENCY: Duration = Duration::from_millis(25);

fn totals(pairs: &[(i32, f64)]) -> Vec<PeriodTotal> {
    pairs
        .iter()
        .map(|(period, total)| PeriodTotal {
            period: *period,
            total: *total,
        })
        .collect()
}

fn clients(pairs: &[(Option<&str>, u64)]) -> Vec<ClientCount> {
    pairs
        .iter()
        .map(|(name, count)| ClientCount {
            client_name: name.map(str::to_string),
            count: *count,
        })
        .collect()
}

/// Stats for 2024, 2025 and the all-years view.
pub(crate) fn sample_source() -> StaticStatsSource {
    let invoices_2024 = InvoiceStats {
        selected_year: Some(2024),
        yearly_total: 18_450.0,
        invoice_count: 14,
        invoiced_clients: 3,
        per_period: totals(&[(1, 2_300.0), (3, 4_150.0), (6, 5_000.0), (11, 7_000.0)]),
        per_client: clients(&[
            (Some("Rossi & Figli"), 6),
            (Some("Bianchi Srl"), 5),
            (None, 3),
        ]),
    };
    let costs_2024 = CostStats {
        selected_year: Some(2024),
        yearly_total: 6_120.5,
        per_period: totals(&[(1, 820.5), (6, 2_300.0), (11, 3_000.0)]),
    };
    let invoices_2025 = InvoiceStats {
        selected_year: Some(2025),
        yearly_total: 9_800.0,
        invoice_count: 7,
        invoiced_clients: 2,
        per_period: totals(&[(2, 3_800.0), (4, 6_000.0)]),
        per_client: clients(&[(Some("Bianchi Srl"), 4), (Some("Verdi Spa"), 3)]),
    };
    let costs_2025 = CostStats {
        selected_year: Some(2025),
        yearly_total: 2_450.0,
        per_period: totals(&[(2, 1_200.0), (4, 1_250.0)]),
    };
    let invoices_all = InvoiceStats {
        selected_year: None,
        yearly_total: 28_250.0,
        invoice_count: 21,
        invoiced_clients: 4,
        per_period: totals(&[(2024, 18_450.0), (2025, 9_800.0)]),
        per_client: clients(&[
            (Some("Rossi & Figli"), 6),
            (Some("Bianchi Srl"), 9),
            (Some("Verdi Spa"), 3),
            (None, 3),
        ]),
    };
    let costs_all = CostStats {
        selected_year: None,
        yearly_total: 8_570.5,
        per_period: totals(&[(2024, 6_120.5), (2025, 2_450.0)]),
    };

    StaticStatsSource::new()
        .with_period(PeriodKey::Year(2024), invoices_2024, costs_2024)
        .with_period(PeriodKey::Year(2025), invoices_2025, costs_2025)
        .with_period(PeriodKey::All, invoices_all, costs_all)
        .with_latency(PeriodKey::Year(2024), SAMPLE_LATENCY)
        .with_latency(PeriodKey::Year(2025), SAMPLE_LATENCY)
        .with_latency(PeriodKey::All, SAMPLE_LATENCY)
}

/// Writes each dashboard state change to stdout.
pub(crate) struct PrintView {
    output: OutputFormat,
}

impl PrintView {
    pub(crate) fn new(output: OutputFormat) -> Self {
        Self { output }
    }
}

impl DashboardView for PrintView {
    fn show_loading(&mut self, period: PeriodKey, message: &str) {
        if self.output == OutputFormat::Text {
            println!("[{}] {message}", period.label());
        }
    }

    fn render(&mut self, snapshot: &DashboardSnapshot) {
        match self.output {
            OutputFormat::Text => print_snapshot(snapshot),
            OutputFormat::Json => match serde_json::to_string(snapshot) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => report_error(&format!("failed to render snapshot: {err}"), self.output),
            },
        }
    }

    fn show_error(&mut self, message: &str) {
        if self.output == OutputFormat::Text {
            eprintln!("{message}");
        }
    }
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    let summary = &snapshot.summary;
    println!("{}", summary.period_label);
    println!("  invoices:         {}", summary.invoice_count);
    println!("  revenue:          {:.2}", summary.revenue_total);
    println!("  costs:            {:.2}", summary.cost_total);
    println!("  invoiced clients: {}", summary.invoiced_clients);

    let chart = &snapshot.revenue_costs;
    println!("{}", chart.title);
    for ((label, revenue), cost) in chart.labels.iter().zip(&chart.revenue).zip(&chart.costs) {
        println!("  {label:<8} revenue={revenue:>10.2} costs={cost:>10.2}");
    }

    println!("{}", snapshot.clients.title);
    for (label, count) in snapshot.clients.labels.iter().zip(&snapshot.clients.values) {
        println!("  {label}: {count}");
    }
}
