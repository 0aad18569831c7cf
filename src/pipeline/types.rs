//! Data types used by the aggregation and scaling pipeline.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::record::WeekRecord;

/// Representation used for derived month labels, both when filtering and in
/// the exported rows. The production dashboards disagreed on this, so it is
/// a configuration knob rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MonthKeyFormat {
    /// Three-letter month abbreviation, "Jan".."Dec".
    Abbreviated,
    /// Zero-padded month number, "01".."12".
    Numeric,
}

impl MonthKeyFormat {
    /// Derives the month label of a week date in this format.
    pub fn label(self, week: NaiveDate) -> String {
        match self {
            MonthKeyFormat::Abbreviated => week.format("%b").to_string(),
            MonthKeyFormat::Numeric => week.format("%m").to_string(),
        }
    }
}

/// How the year selection defaults when the caller does not pick years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum YearPolicy {
    /// Every year present in the table.
    All,
    /// Only the most recent year present in the table.
    Latest,
}

/// The distinct filter values observed in the table: the domain that
/// selections are drawn from and that defaults expand to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub years: BTreeSet<i32>,
    pub food_types: BTreeSet<String>,
    pub months: BTreeSet<String>,
}

impl Facets {
    pub fn from_records(records: &[WeekRecord], month_format: MonthKeyFormat) -> Self {
        Facets {
            years: records.iter().map(|r| r.year).collect(),
            food_types: records.iter().map(|r| r.food_type.clone()).collect(),
            months: records
                .iter()
                .map(|r| month_format.label(r.week))
                .collect(),
        }
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.iter().next_back().copied()
    }
}

/// A fully resolved filter: the rows kept are those whose year, food type,
/// and derived month label are each members of the corresponding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub food_types: BTreeSet<String>,
    pub months: BTreeSet<String>,
    pub month_format: MonthKeyFormat,
}

impl FilterSelection {
    /// Expands partial user input into a full selection: omitted food types
    /// and months default to everything observed, omitted years follow the
    /// configured [`YearPolicy`].
    pub fn resolve(
        facets: &Facets,
        years: Option<Vec<i32>>,
        food_types: Option<Vec<String>>,
        months: Option<Vec<String>>,
        year_policy: YearPolicy,
        month_format: MonthKeyFormat,
    ) -> Self {
        let years = match years {
            Some(picked) => picked.into_iter().collect(),
            None => match year_policy {
                YearPolicy::All => facets.years.clone(),
                YearPolicy::Latest => facets.latest_year().into_iter().collect(),
            },
        };

        FilterSelection {
            years,
            food_types: match food_types {
                Some(picked) => picked.into_iter().collect(),
                None => facets.food_types.clone(),
            },
            months: match months {
                Some(picked) => picked.into_iter().collect(),
                None => facets.months.clone(),
            },
            month_format,
        }
    }
}

/// Weighted weekly averages for one `(week, week_number, year)` group.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyAggregate {
    pub week: NaiveDate,
    pub week_number: u32,
    pub year: i32,
    /// Derived from the week date; feeds the secondary axis labels only.
    pub month_label: String,
    pub press_kwh: f64,
    pub press_utilization: f64,
    pub plant_yield: f64,
}

/// Per-point annotation values, one decimal place, one set per aggregate.
/// The yield label carries the unscaled mean even though the chart plots the
/// scaled value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PointLabels {
    pub press_kwh: String,
    pub press_utilization: String,
    pub plant_yield: String,
}

/// Everything the charting layer consumes: the chronological aggregates, the
/// yield series co-scaled onto the energy range (positionally aligned), and
/// the annotation labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartData {
    pub points: Vec<WeeklyAggregate>,
    pub yield_scaled: Vec<f64>,
    pub labels: Vec<PointLabels>,
}

/// Result of one pipeline run. An empty selection is an expected terminal
/// state reported to the user, not an error.
#[derive(Debug)]
pub enum PipelineOutcome {
    Chart(ChartData),
    EmptySelection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_week_date;

    fn record(week: &str, year: i32, food_type: &str) -> WeekRecord {
        WeekRecord {
            week: parse_week_date(week).unwrap(),
            week_number: 1,
            year,
            food_type: food_type.to_string(),
            tons: 10.0,
            press_kwh: 30.0,
            press_utilization: 80.0,
            plant_yield: 90.0,
        }
    }

    #[test]
    fn test_month_label_formats() {
        let week = parse_week_date("2025-01-06").unwrap();
        assert_eq!(MonthKeyFormat::Abbreviated.label(week), "Jan");
        assert_eq!(MonthKeyFormat::Numeric.label(week), "01");
    }

    #[test]
    fn test_facets_collect_distinct_values() {
        let records = vec![
            record("2024-02-05", 2024, "Broiler"),
            record("2025-01-06", 2025, "Layer"),
            record("2025-01-13", 2025, "Broiler"),
        ];

        let facets = Facets::from_records(&records, MonthKeyFormat::Abbreviated);
        assert_eq!(facets.years.len(), 2);
        assert_eq!(facets.food_types.len(), 2);
        assert!(facets.months.contains("Jan"));
        assert!(facets.months.contains("Feb"));
        assert_eq!(facets.latest_year(), Some(2025));
    }

    #[test]
    fn test_resolve_latest_year_policy() {
        let records = vec![
            record("2024-02-05", 2024, "Broiler"),
            record("2025-01-06", 2025, "Broiler"),
        ];
        let facets = Facets::from_records(&records, MonthKeyFormat::Abbreviated);

        let selection = FilterSelection::resolve(
            &facets,
            None,
            None,
            None,
            YearPolicy::Latest,
            MonthKeyFormat::Abbreviated,
        );

        assert_eq!(selection.years.into_iter().collect::<Vec<_>>(), vec![2025]);
        assert_eq!(selection.food_types, facets.food_types);
        assert_eq!(selection.months, facets.months);
    }

    #[test]
    fn test_resolve_all_years_policy() {
        let records = vec![
            record("2024-02-05", 2024, "Broiler"),
            record("2025-01-06", 2025, "Broiler"),
        ];
        let facets = Facets::from_records(&records, MonthKeyFormat::Abbreviated);

        let selection = FilterSelection::resolve(
            &facets,
            None,
            None,
            None,
            YearPolicy::All,
            MonthKeyFormat::Abbreviated,
        );

        assert_eq!(selection.years, facets.years);
    }

    #[test]
    fn test_resolve_keeps_explicit_choices() {
        let records = vec![record("2025-01-06", 2025, "Broiler")];
        let facets = Facets::from_records(&records, MonthKeyFormat::Numeric);

        let selection = FilterSelection::resolve(
            &facets,
            Some(vec![2023]),
            Some(vec!["Layer".to_string()]),
            Some(vec!["02".to_string()]),
            YearPolicy::All,
            MonthKeyFormat::Numeric,
        );

        assert!(selection.years.contains(&2023));
        assert!(selection.food_types.contains("Layer"));
        assert!(selection.months.contains("02"));
    }

    #[test]
    fn test_latest_year_empty_table() {
        let facets = Facets::from_records(&[], MonthKeyFormat::Abbreviated);
        assert_eq!(facets.latest_year(), None);

        let selection = FilterSelection::resolve(
            &facets,
            None,
            None,
            None,
            YearPolicy::Latest,
            MonthKeyFormat::Abbreviated,
        );
        assert!(selection.years.is_empty());
    }
}
