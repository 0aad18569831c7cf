//! The weekly production record and table-level summary statistics.

use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::pipeline::utility::{mean, stddev};

/// One row of the weekly production table, as exported by the plant
/// (`datos_pellet.csv` column headers). Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WeekRecord {
    /// Date of the week the row belongs to.
    #[serde(rename = "Semana", deserialize_with = "de_week_date")]
    pub week: NaiveDate,
    /// Week ordinal within the plant calendar.
    #[serde(rename = "SemanaNum")]
    pub week_number: u32,
    #[serde(rename = "Anio")]
    pub year: i32,
    #[serde(rename = "TipoAlimento")]
    pub food_type: String,
    /// Tonnage produced; the weight used by every weighted average.
    #[serde(rename = "ton")]
    pub tons: f64,
    /// Press energy consumption, kWh per ton.
    #[serde(rename = "kwh_prensa")]
    pub press_kwh: f64,
    /// Press utilization percentage.
    #[serde(rename = "porc_prensa")]
    pub press_utilization: f64,
    /// Plant yield percentage.
    #[serde(rename = "Rendimiento")]
    pub plant_yield: f64,
}

/// Parses a week date, accepting ISO and the day-first forms seen across
/// exports of the production table.
pub fn parse_week_date(raw: &str) -> anyhow::Result<NaiveDate> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

    let raw = raw.trim();
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }

    bail!("unrecognized week date: {raw:?}")
}

fn de_week_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_week_date(&raw).map_err(serde::de::Error::custom)
}

/// Summary statistics for one metric column over the raw table.
#[derive(Debug, Serialize)]
pub struct MetricSummary {
    pub metric: &'static str,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

/// Table-level overview: row count, total tonnage, and per-metric statistics.
#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub total_tons: f64,
    pub metrics: Vec<MetricSummary>,
}

/// Computes [`TableSummary`] over the raw table. An empty table yields
/// zeroed statistics rather than an error.
pub fn summarize(records: &[WeekRecord]) -> TableSummary {
    TableSummary {
        generated_at: Utc::now(),
        rows: records.len(),
        total_tons: records.iter().map(|r| r.tons).sum(),
        metrics: vec![
            metric_summary("press_kwh", records, |r| r.press_kwh),
            metric_summary("press_utilization", records, |r| r.press_utilization),
            metric_summary("plant_yield", records, |r| r.plant_yield),
        ],
    }
}

fn metric_summary(
    metric: &'static str,
    records: &[WeekRecord],
    value: impl Fn(&WeekRecord) -> f64,
) -> MetricSummary {
    let values: Vec<f64> = records.iter().map(value).collect();
    let avg = mean(&values);

    let (min, max) = values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    });

    MetricSummary {
        metric,
        mean: avg,
        stddev: stddev(&values, avg),
        min: if values.is_empty() { 0.0 } else { min },
        max: if values.is_empty() { 0.0 } else { max },
    }
}
