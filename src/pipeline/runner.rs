//! End-to-end pipeline: filter, aggregate, co-scale, annotate.

use crate::pipeline::aggregate::aggregate_weekly;
use crate::pipeline::filter;
use crate::pipeline::scale::{ScaleRange, co_scale};
use crate::pipeline::types::{ChartData, FilterSelection, PipelineOutcome, PointLabels};
use crate::record::WeekRecord;

/// Runs one full recomputation over the raw table for the given selection.
///
/// Pure with respect to its inputs; all IO stays with the caller. An empty
/// filtered subset halts before aggregation and reports
/// [`PipelineOutcome::EmptySelection`].
pub fn run(records: &[WeekRecord], selection: &FilterSelection) -> PipelineOutcome {
    let filtered = filter::apply(records, selection);
    if filtered.is_empty() {
        return PipelineOutcome::EmptySelection;
    }

    let points = aggregate_weekly(&filtered, selection.month_format);

    let yield_series: Vec<f64> = points.iter().map(|p| p.plant_yield).collect();
    let kwh_series: Vec<f64> = points.iter().map(|p| p.press_kwh).collect();
    let yield_scaled = co_scale(
        &yield_series,
        ScaleRange::of(&yield_series),
        ScaleRange::of(&kwh_series),
    );

    let labels = points
        .iter()
        .map(|p| PointLabels {
            press_kwh: format!("{:.1}", p.press_kwh),
            press_utilization: format!("{:.1}", p.press_utilization),
            plant_yield: format!("{:.1}", p.plant_yield),
        })
        .collect();

    PipelineOutcome::Chart(ChartData {
        points,
        yield_scaled,
        labels,
    })
}
