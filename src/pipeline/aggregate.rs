//! Weighted weekly aggregation.
//!
//! Rows are grouped by the full `(week, week_number, year)` triple — the
//! week date alone does not disambiguate every export of the table — and
//! each metric is reduced to a tonnage-weighted mean per group.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::pipeline::types::{MonthKeyFormat, WeeklyAggregate};
use crate::pipeline::utility::weighted_mean;
use crate::record::WeekRecord;

type WeekKey = (NaiveDate, u32, i32);

/// Reduces filtered rows to one [`WeeklyAggregate`] per week key, ordered
/// ascending by week date. A group whose tonnage sums to zero reports 0.0
/// for every metric; other groups are unaffected.
pub fn aggregate_weekly(rows: &[WeekRecord], month_format: MonthKeyFormat) -> Vec<WeeklyAggregate> {
    let mut groups: BTreeMap<WeekKey, Vec<&WeekRecord>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.week, row.week_number, row.year))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((week, week_number, year), members)| {
            let tons: Vec<f64> = members.iter().map(|r| r.tons).collect();
            let metric = |value: fn(&WeekRecord) -> f64| {
                let values: Vec<f64> = members.iter().map(|r| value(r)).collect();
                weighted_mean(&values, &tons)
            };

            WeeklyAggregate {
                week,
                week_number,
                year,
                month_label: month_format.label(week),
                press_kwh: metric(|r| r.press_kwh),
                press_utilization: metric(|r| r.press_utilization),
                plant_yield: metric(|r| r.plant_yield),
            }
        })
        .collect()
}
