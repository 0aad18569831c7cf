//! Conjunctive row filtering over the production table.

use crate::pipeline::types::FilterSelection;
use crate::record::WeekRecord;

/// Keeps the rows whose year, food type, and derived month label are all
/// members of the selection. An empty result is a valid outcome; the caller
/// decides how to report it.
pub fn apply(records: &[WeekRecord], selection: &FilterSelection) -> Vec<WeekRecord> {
    records
        .iter()
        .filter(|r| {
            selection.years.contains(&r.year)
                && selection.food_types.contains(&r.food_type)
                && selection
                    .months
                    .contains(&selection.month_format.label(r.week))
        })
        .cloned()
        .collect()
}
