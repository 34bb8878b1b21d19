//! Trend analysis over historical year series.

use map_data_metrics_models::TrendDirection;
use map_data_query_models::TimePeriod;

/// Absolute change below which a series counts as stable, in storage
/// units.
const STABLE_TOLERANCE: f64 = 0.01;

/// Checks whether a chronological series exhibits the expected trend over
/// the given period.
///
/// * `Recent { years }`: compares the first and last value of the trailing
///   window (at least two points). Increase requires last > first,
///   decrease last < first, stable `|last − first| < 0.01`.
/// * `Majority { years, threshold }`: counts year-over-year moves in the
///   expected direction within the trailing window and requires at least
///   `threshold` of them.
#[must_use]
pub fn analyze_time_trend(series: &[f64], trend: TrendDirection, period: TimePeriod) -> bool {
    match period {
        TimePeriod::Recent { years } => {
            let Some(window) = trailing(series, years) else {
                return false;
            };
            let first = window[0];
            let last = window[window.len() - 1];
            match trend {
                TrendDirection::Increase => last > first,
                TrendDirection::Decrease => last < first,
                TrendDirection::Stable => (last - first).abs() < STABLE_TOLERANCE,
            }
        }
        TimePeriod::Majority { years, threshold } => {
            let Some(window) = trailing(series, years) else {
                return false;
            };
            let moves = window
                .windows(2)
                .filter(|pair| match trend {
                    TrendDirection::Increase => pair[1] > pair[0],
                    TrendDirection::Decrease => pair[1] < pair[0],
                    TrendDirection::Stable => (pair[1] - pair[0]).abs() < STABLE_TOLERANCE,
                })
                .count();
            moves >= threshold
        }
    }
}

/// The trailing `years` values, widened to at least two points. `None`
/// when the series is too short to describe change.
fn trailing(series: &[f64], years: usize) -> Option<&[f64]> {
    if series.len() < 2 {
        return None;
    }
    let start = series.len().saturating_sub(years.max(2));
    Some(&series[start..])
}
