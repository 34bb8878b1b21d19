//! Descriptive statistics primitives.
//!
//! Small numeric kernels over value slices. All return `None` on empty
//! input (and `correlation` additionally on mismatched or degenerate
//! input) so that callers never see `NaN`.

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value of the sorted slice; the mean of the two middle values
/// for even lengths.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sum of the values.
#[must_use]
pub fn sum(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum())
}

/// Population variance.
#[must_use]
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    #[allow(clippy::cast_precision_loss)]
    Some(
        values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64,
    )
}

/// Population standard deviation.
#[must_use]
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Smallest value.
#[must_use]
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Largest value.
#[must_use]
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Difference between the largest and smallest value.
#[must_use]
pub fn range(values: &[f64]) -> Option<f64> {
    Some(max(values)? - min(values)?)
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` for mismatched lengths, fewer than two points, or a
/// series with zero variance.
#[must_use]
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some(covariance / denominator)
}

/// The three quartile cut points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile (the median).
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

/// Quartiles by linear interpolation between sorted values.
#[must_use]
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(Quartiles {
        q1: percentile(&sorted, 0.25),
        q2: percentile(&sorted, 0.50),
        q3: percentile(&sorted, 0.75),
    })
}

/// Linear-interpolated percentile over an already-sorted slice.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let position = fraction * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let weight = position - position.floor();
    sorted[lower].mul_add(1.0 - weight, sorted[upper] * weight)
}

/// The aggregate reported by the "summary" function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Count, mean, median, standard deviation, min, and max in one pass.
#[must_use]
pub fn summary(values: &[f64]) -> Option<Summary> {
    Some(Summary {
        count: values.len(),
        mean: mean(values)?,
        median: median(values)?,
        std_dev: standard_deviation(values)?,
        min: min(values)?,
        max: max(values)?,
    })
}

/// Bridges registry function names to the scalar implementations.
///
/// `correlation`, `quartiles`, and `summary` have non-scalar results and
/// are handled by their callers directly.
#[must_use]
pub fn by_name(name: &str, values: &[f64]) -> Option<f64> {
    match name {
        "mean" => mean(values),
        "median" => median(values),
        "sum" => sum(values),
        "standard_deviation" => standard_deviation(values),
        "variance" => variance(values),
        "min" => min(values),
        "max" => max(values),
        "range" => range(values),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: &[f64] = &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn mean_and_median() {
        assert!((mean(VALUES).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((median(VALUES).unwrap() - 4.5).abs() < f64::EPSILON);
        assert!((median(&[3.0, 1.0, 2.0]).unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dispersion() {
        // Classic textbook set: population std dev exactly 2.
        assert!((standard_deviation(VALUES).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((variance(VALUES).unwrap() - 4.0).abs() < f64::EPSILON);
        assert!((range(VALUES).unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extremes_and_sum() {
        assert!((min(VALUES).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((max(VALUES).unwrap() - 9.0).abs() < f64::EPSILON);
        assert!((sum(VALUES).unwrap() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_is_none() {
        assert!(mean(&[]).is_none());
        assert!(median(&[]).is_none());
        assert!(sum(&[]).is_none());
        assert!(standard_deviation(&[]).is_none());
        assert!(min(&[]).is_none());
        assert!(quartiles(&[]).is_none());
        assert!(summary(&[]).is_none());
    }

    #[test]
    fn correlation_signs() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((correlation(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);

        let zs = [10.0, 8.0, 6.0, 4.0, 2.0];
        assert!((correlation(&xs, &zs).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_degenerate_inputs() {
        assert!(correlation(&[1.0], &[2.0]).is_none());
        assert!(correlation(&[1.0, 2.0], &[3.0]).is_none());
        // Zero variance on one side.
        assert!(correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn quartile_interpolation() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((q.q1 - 1.75).abs() < f64::EPSILON);
        assert!((q.q2 - 2.5).abs() < f64::EPSILON);
        assert!((q.q3 - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn by_name_bridges_scalar_functions() {
        assert!((by_name("mean", VALUES).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((by_name("max", VALUES).unwrap() - 9.0).abs() < f64::EPSILON);
        assert!(by_name("correlation", VALUES).is_none());
        assert!(by_name("nonsense", VALUES).is_none());
    }

    #[test]
    fn summary_aggregates() {
        let s = summary(VALUES).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < f64::EPSILON);
        assert!((s.min - 2.0).abs() < f64::EPSILON);
        assert!((s.max - 9.0).abs() < f64::EPSILON);
    }
}
