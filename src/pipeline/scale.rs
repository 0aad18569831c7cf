//! Min-max co-scaling: remaps one series' range onto another metric's range
//! so the two can share an axis. This is not unit normalization; the output
//! lands in the target metric's native range.

/// The observed [min, max] of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    /// Computes the range of a series. An empty series collapses to the
    /// degenerate `[0, 0]` range.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return ScaleRange { min: 0.0, max: 0.0 };
        }

        values.iter().fold(
            ScaleRange {
                min: f64::MAX,
                max: f64::MIN,
            },
            |range, &v| ScaleRange {
                min: range.min.min(v),
                max: range.max.max(v),
            },
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Linearly remaps each value from the source range into the target range.
/// A degenerate source range returns the series unchanged, so a flat series
/// is never expanded or collapsed.
pub fn co_scale(series: &[f64], source: ScaleRange, target: ScaleRange) -> Vec<f64> {
    if source.is_degenerate() {
        return series.to_vec();
    }

    series
        .iter()
        .map(|&v| (v - source.min) / source.span() * target.span() + target.min)
        .collect()
}
