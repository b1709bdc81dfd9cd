//! Aggregate statistics records consumed by the dashboard.
//!
//! # Responsibility
//! - Decode the backend's row-shaped stats payloads.
//! - Tolerate numeric fields sent as strings, defaulting unparseable values
//!   to zero instead of failing the whole payload.
//!
//! # Invariants
//! - `selected_year == None` means the payload aggregates all years and
//!   `per_period` rows are keyed by year; otherwise rows are keyed by month.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

/// One row of a time-series aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// Month number (1-12) for a specific year, or the year itself.
    #[serde(alias = "mese", alias = "anno")]
    pub period: i32,
    #[serde(alias = "totale", deserialize_with = "lenient_f64", default)]
    pub total: f64,
}

/// One row of the per-client distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCount {
    #[serde(alias = "cliente", alias = "clientName", default)]
    pub client_name: Option<String>,
    #[serde(alias = "conteggio", deserialize_with = "lenient_u64", default)]
    pub count: u64,
}

/// Revenue side of the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceStats {
    #[serde(alias = "anno_selezionato", default)]
    pub selected_year: Option<i32>,
    #[serde(alias = "totale_annuo", deserialize_with = "lenient_f64", default)]
    pub yearly_total: f64,
    #[serde(alias = "totale_fatture", deserialize_with = "lenient_u64", default)]
    pub invoice_count: u64,
    #[serde(alias = "clienti_con_fatture", deserialize_with = "lenient_u64", default)]
    pub invoiced_clients: u64,
    #[serde(alias = "per_mese", default)]
    pub per_period: Vec<PeriodTotal>,
    #[serde(alias = "per_cliente", default)]
    pub per_client: Vec<ClientCount>,
}

/// Cost side of the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostStats {
    #[serde(alias = "anno_selezionato", default)]
    pub selected_year: Option<i32>,
    #[serde(alias = "totale_annuo", deserialize_with = "lenient_f64", default)]
    pub yearly_total: f64,
    #[serde(alias = "per_mese", default)]
    pub per_period: Vec<PeriodTotal>,
}

impl InvoiceStats {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl CostStats {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        Ok(value.trim().parse::<f64>().unwrap_or(0.0))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = deserializer.deserialize_any(LenientNumber)?;
    Ok(if value.is_finite() { value } else { 0.0 })
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = lenient_f64(deserializer)?;
    if value <= 0.0 {
        return Ok(0);
    }
    Ok(value.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::{CostStats, InvoiceStats};

    #[test]
    fn decodes_backend_field_names() {
        let raw = r#"{
            "anno_selezionato": 2024,
            "totale_annuo": "1234.50",
            "totale_fatture": 7,
            "clienti_con_fatture": "3",
            "per_mese": [{"mese": 1, "conteggio": 2, "totale": 120.0}],
            "per_cliente": [{"cliente": "Mario Rossi", "conteggio": 4, "totale": 10.0}]
        }"#;
        let stats = InvoiceStats::from_json_str(raw).expect("payload should decode");
        assert_eq!(stats.selected_year, Some(2024));
        assert_eq!(stats.yearly_total, 1234.5);
        assert_eq!(stats.invoice_count, 7);
        assert_eq!(stats.invoiced_clients, 3);
        assert_eq!(stats.per_period[0].period, 1);
        assert_eq!(stats.per_client[0].client_name.as_deref(), Some("Mario Rossi"));
        assert_eq!(stats.per_client[0].count, 4);
    }

    #[test]
    fn unparseable_numeric_strings_default_to_zero() {
        let raw = r#"{"totale_annuo": "n/a", "per_mese": [{"anno": 2023, "totale": null}]}"#;
        let stats = CostStats::from_json_str(raw).expect("payload should decode");
        assert_eq!(stats.yearly_total, 0.0);
        assert_eq!(stats.per_period[0].period, 2023);
        assert_eq!(stats.per_period[0].total, 0.0);
        assert!(stats.selected_year.is_none());
    }
}
