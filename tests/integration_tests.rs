use pellet_trends::loader::load_records;
use pellet_trends::pipeline::runner;
use pellet_trends::pipeline::types::{
    Facets, FilterSelection, MonthKeyFormat, PipelineOutcome, YearPolicy,
};
use std::path::Path;

fn fixture() -> Vec<pellet_trends::record::WeekRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pellet_sample.csv");
    load_records(path).expect("Failed to load fixture table")
}

fn selection(records: &[pellet_trends::record::WeekRecord]) -> FilterSelection {
    let facets = Facets::from_records(records, MonthKeyFormat::Abbreviated);
    FilterSelection::resolve(
        &facets,
        None,
        None,
        None,
        YearPolicy::Latest,
        MonthKeyFormat::Abbreviated,
    )
}

#[test]
fn test_full_pipeline_latest_year() {
    let records = fixture();
    assert_eq!(records.len(), 7);

    let PipelineOutcome::Chart(chart) = runner::run(&records, &selection(&records)) else {
        panic!("expected chart data for the latest year");
    };

    // 2025 has five rows over four distinct weeks; the two 2025-01-06 rows
    // merge into one weighted group.
    assert_eq!(chart.points.len(), 4);
    assert_eq!(chart.yield_scaled.len(), 4);
    assert_eq!(chart.labels.len(), 4);

    let weeks: Vec<_> = chart.points.iter().map(|p| p.week).collect();
    let mut sorted = weeks.clone();
    sorted.sort();
    assert_eq!(weeks, sorted);
    assert!(chart.points.iter().all(|p| p.year == 2025));

    let merged = &chart.points[0];
    let expected_kwh = (31.2 * 120.5 + 29.0 * 80.0) / (120.5 + 80.0);
    assert_eq!(merged.press_kwh, expected_kwh);
    assert!(merged.press_kwh >= 29.0 && merged.press_kwh <= 31.2);
    assert_eq!(merged.month_label, "Jan");

    // The zero-tonnage week reports zeros without touching its neighbors.
    let zero_week = &chart.points[2];
    assert_eq!(zero_week.week_number, 6);
    assert_eq!(zero_week.press_kwh, 0.0);
    assert_eq!(zero_week.press_utilization, 0.0);
    assert_eq!(zero_week.plant_yield, 0.0);
    assert!(chart.points[1].press_kwh > 0.0);
}

#[test]
fn test_scaled_yield_spans_the_energy_range() {
    let records = fixture();

    let PipelineOutcome::Chart(chart) = runner::run(&records, &selection(&records)) else {
        panic!("expected chart data");
    };

    let kwh_min = chart
        .points
        .iter()
        .map(|p| p.press_kwh)
        .fold(f64::MAX, f64::min);
    let kwh_max = chart
        .points
        .iter()
        .map(|p| p.press_kwh)
        .fold(f64::MIN, f64::max);

    for scaled in &chart.yield_scaled {
        assert!(*scaled >= kwh_min && *scaled <= kwh_max);
    }

    let yield_max_idx = (0..chart.points.len())
        .max_by(|&a, &b| {
            chart.points[a]
                .plant_yield
                .total_cmp(&chart.points[b].plant_yield)
        })
        .unwrap();
    assert_eq!(chart.yield_scaled[yield_max_idx], kwh_max);
}

#[test]
fn test_month_filter_restricts_weeks() {
    let records = fixture();
    let facets = Facets::from_records(&records, MonthKeyFormat::Abbreviated);

    let jan_only = FilterSelection::resolve(
        &facets,
        None,
        None,
        Some(vec!["Jan".to_string()]),
        YearPolicy::Latest,
        MonthKeyFormat::Abbreviated,
    );

    let PipelineOutcome::Chart(chart) = runner::run(&records, &jan_only) else {
        panic!("expected chart data for January");
    };

    assert_eq!(chart.points.len(), 2);
    assert!(chart.points.iter().all(|p| p.month_label == "Jan"));
}

#[test]
fn test_unmatched_year_halts_with_empty_selection() {
    let records = fixture();
    let facets = Facets::from_records(&records, MonthKeyFormat::Abbreviated);

    let no_such_year = FilterSelection::resolve(
        &facets,
        Some(vec![1999]),
        None,
        None,
        YearPolicy::Latest,
        MonthKeyFormat::Abbreviated,
    );

    assert!(matches!(
        runner::run(&records, &no_such_year),
        PipelineOutcome::EmptySelection
    ));
}
