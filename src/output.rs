//! Export of chart-ready data.
//!
//! Supports pretty-printing, JSON serialization, and a flat CSV with one row
//! per weekly aggregate for the charting layer to consume.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::pipeline::types::ChartData;

/// One exported row: the aggregate, its co-scaled yield value, and the
/// three annotation labels, positionally aligned by construction.
#[derive(Debug, Serialize)]
struct ChartRow<'a> {
    week: NaiveDate,
    week_number: u32,
    year: i32,
    month_label: &'a str,
    press_kwh: f64,
    press_utilization: f64,
    plant_yield: f64,
    plant_yield_scaled: f64,
    press_kwh_label: &'a str,
    press_utilization_label: &'a str,
    plant_yield_label: &'a str,
}

/// Logs a payload using Rust's debug pretty-print format.
pub fn print_pretty(payload: &impl std::fmt::Debug) {
    debug!("{:#?}", payload);
}

/// Logs a payload as pretty-printed JSON.
pub fn print_json(payload: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

/// Writes the chart payload as pretty-printed JSON to a file.
pub fn write_chart_json(path: &str, chart: &ChartData) -> Result<()> {
    debug!(path, "Writing chart JSON");
    std::fs::write(path, serde_json::to_string_pretty(chart)?)?;
    Ok(())
}

/// Writes the chart-ready rows to a CSV file, one row per weekly aggregate.
/// Any existing file at `path` is replaced.
pub fn write_chart_csv(path: &str, chart: &ChartData) -> Result<()> {
    debug!(path, rows = chart.points.len(), "Writing chart CSV");

    let mut writer = csv::Writer::from_path(path)?;

    for ((point, scaled), labels) in chart
        .points
        .iter()
        .zip(&chart.yield_scaled)
        .zip(&chart.labels)
    {
        writer.serialize(ChartRow {
            week: point.week,
            week_number: point.week_number,
            year: point.year,
            month_label: &point.month_label,
            press_kwh: point.press_kwh,
            press_utilization: point.press_utilization,
            plant_yield: point.plant_yield,
            plant_yield_scaled: *scaled,
            press_kwh_label: &labels.press_kwh,
            press_utilization_label: &labels.press_utilization,
            plant_yield_label: &labels.plant_yield,
        })?;
    }

    writer.flush()?;
    Ok(())
}
