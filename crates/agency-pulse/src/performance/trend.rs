use super::domain::TrendDirection;
use serde::{Deserialize, Serialize};

/// Least-squares trend over an ordered series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub direction: TrendDirection,
    pub slope: f64,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
}

/// Fits `value ~ index` over `values` (oldest first).
///
/// Returns `None` for fewer than two points; callers surface that as
/// "not yet available" rather than a stable trend.
pub fn trend(values: &[f64]) -> Option<MetricTrend> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    // Centered on the mean index and offset by the first value, so a flat
    // series sums exact zeros and yields a slope of exactly 0.
    let mean_x = (n - 1) as f64 / 2.0;
    let origin = values[0];
    let (mut numerator, mut denominator) = (0.0, 0.0);
    for (index, value) in values.iter().enumerate() {
        let dx = index as f64 - mean_x;
        numerator += dx * (value - origin);
        denominator += dx * dx;
    }

    // Non-zero for n >= 2 since x takes distinct values.
    let slope = numerator / denominator;

    let direction = if slope > 0.0 {
        TrendDirection::Upward
    } else if slope < 0.0 {
        TrendDirection::Downward
    } else {
        TrendDirection::Stable
    };

    let current = values[n - 1];
    let previous = values[n - 2];

    Some(MetricTrend {
        direction,
        slope,
        current,
        previous,
        change: current - previous,
    })
}
