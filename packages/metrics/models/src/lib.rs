#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Metric taxonomy and per-metric configuration.
//!
//! This crate defines the canonical vocabulary of map metrics used across
//! the entire map-data system, along with the per-metric configuration the
//! interpreter and evaluator both depend on: storage-unit scaling,
//! qualitative thresholds ("high income"), and the 0-100 normalization
//! scales used for cross-metric comparison.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The metrics a dataset can describe.
///
/// Datasets do not store raw user-facing units. To keep the embedded tables
/// compact, `Population` is stored in millions, `Income` and `LandArea` in
/// thousands, and the two rates (`CrimeRates`, `Unemployment`) as plain
/// fractions. [`DataType::storage_divisor`] converts a user-facing
/// threshold into storage units.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
    /// Resident population (stored in millions).
    Population,
    /// Crimes per capita (stored as a fraction).
    CrimeRates,
    /// Median household income (stored in thousands of dollars).
    Income,
    /// Unemployment rate (stored as a fraction).
    Unemployment,
    /// Land area (stored in thousands of square miles).
    LandArea,
}

impl DataType {
    /// Returns all metric variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Population,
            Self::CrimeRates,
            Self::Income,
            Self::Unemployment,
            Self::LandArea,
        ]
    }

    /// Human-readable label for CLI output ("crime rates", "land area").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::CrimeRates => "crime rates",
            Self::Income => "income",
            Self::Unemployment => "unemployment",
            Self::LandArea => "land area",
        }
    }

    /// Factor that converts a user-facing threshold into the dataset's
    /// storage units.
    ///
    /// "population over 10 million" carries the threshold `10_000_000`;
    /// the population dataset stores millions, so the threshold is divided
    /// by `1_000_000` before comparison.
    #[must_use]
    pub const fn storage_divisor(self) -> f64 {
        match self {
            Self::Population => 1_000_000.0,
            Self::Income | Self::LandArea => 1_000.0,
            Self::CrimeRates | Self::Unemployment => 1.0,
        }
    }

    /// Qualitative thresholds for this metric, in user-facing units.
    ///
    /// These back phrases like "high income" or "low crime": "high" means
    /// greater than `high`, "low" means less than `low`.
    #[must_use]
    pub const fn qualitative_thresholds(self) -> QualitativeThresholds {
        match self {
            Self::Population => QualitativeThresholds {
                high: 15_000_000.0,
                low: 10_000_000.0,
            },
            Self::CrimeRates => QualitativeThresholds {
                high: 0.10,
                low: 0.08,
            },
            Self::Income => QualitativeThresholds {
                high: 65_000.0,
                low: 60_000.0,
            },
            Self::Unemployment => QualitativeThresholds {
                high: 0.07,
                low: 0.06,
            },
            Self::LandArea => QualitativeThresholds {
                high: 100_000.0,
                low: 50_000.0,
            },
        }
    }

    /// Projects a stored value onto the common 0-100 comparison scale.
    ///
    /// Each metric has its own scale factor so that values of different
    /// metrics become comparable: population saturates at 40 million,
    /// income at $100k, land area at 700k square miles; the two rates map
    /// a fraction directly to 0-100.
    #[must_use]
    pub fn normalized_score(self, stored: f64) -> f64 {
        let score = match self {
            Self::Population => stored / 40.0 * 100.0,
            Self::CrimeRates | Self::Unemployment => stored * 100.0,
            Self::Income => stored / 100.0 * 100.0,
            Self::LandArea => stored / 700.0 * 100.0,
        };
        score.min(100.0)
    }
}

/// The "high" / "low" cutoffs for one metric, in user-facing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitativeThresholds {
    /// Values strictly above this count as "high".
    pub high: f64,
    /// Values strictly below this count as "low".
    pub low: f64,
}

/// Comparison operators recognized in commands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComparisonOperator {
    /// Strictly greater than.
    Gt,
    /// Strictly less than.
    Lt,
    /// Equal (within a tolerance chosen by the caller).
    Eq,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
}

impl ComparisonOperator {
    /// Applies the operator to a pair of values.
    ///
    /// `Eq` uses an exact-ish tolerance of `f64::EPSILON`; callers that
    /// want a looser band use [`Self::compare_with_tolerance`].
    #[must_use]
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        self.compare_with_tolerance(lhs, rhs, f64::EPSILON)
    }

    /// Applies the operator with an explicit `Eq` tolerance.
    #[must_use]
    pub fn compare_with_tolerance(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Lt => lhs < rhs,
            Self::Eq => (lhs - rhs).abs() < tolerance,
            Self::Gte => lhs >= rhs,
            Self::Lte => lhs <= rhs,
        }
    }

    /// The operator with its arguments swapped, e.g. `a > b` ⇔ `b < a`.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Gt => Self::Lt,
            Self::Lt => Self::Gt,
            Self::Gte => Self::Lte,
            Self::Lte => Self::Gte,
            Self::Eq => Self::Eq,
        }
    }
}

/// Directional change detected across a historical time series.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendDirection {
    /// Values rising over the window.
    Increase,
    /// Values falling over the window.
    Decrease,
    /// Values flat over the window.
    Stable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_divisors() {
        assert!((DataType::Population.storage_divisor() - 1_000_000.0).abs() < f64::EPSILON);
        assert!((DataType::Income.storage_divisor() - 1_000.0).abs() < f64::EPSILON);
        assert!((DataType::CrimeRates.storage_divisor() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_table_is_ordered() {
        for data_type in DataType::all() {
            let t = data_type.qualitative_thresholds();
            assert!(t.high > t.low, "{data_type}: high must exceed low");
        }
    }

    #[test]
    fn normalized_score_caps_at_100() {
        assert!((DataType::Population.normalized_score(80.0) - 100.0).abs() < f64::EPSILON);
        assert!((DataType::Income.normalized_score(250.0) - 100.0).abs() < f64::EPSILON);
        assert!((DataType::LandArea.normalized_score(665.4) - 95.057).abs() < 0.01);
    }

    #[test]
    fn rates_scale_linearly() {
        assert!((DataType::CrimeRates.normalized_score(0.09) - 9.0).abs() < 1e-9);
        assert!((DataType::Unemployment.normalized_score(0.05) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn operators_compare() {
        assert!(ComparisonOperator::Gt.compare(2.0, 1.0));
        assert!(!ComparisonOperator::Gt.compare(1.0, 1.0));
        assert!(ComparisonOperator::Gte.compare(1.0, 1.0));
        assert!(ComparisonOperator::Lt.compare(0.5, 1.0));
        assert!(ComparisonOperator::Eq.compare_with_tolerance(10.4, 10.0, 1.0));
        assert!(!ComparisonOperator::Eq.compare_with_tolerance(12.0, 10.0, 1.0));
    }

    #[test]
    fn flipped_is_antisymmetric() {
        let pairs = [(3.0, 1.0), (1.0, 3.0)];
        for (a, b) in pairs {
            assert_eq!(
                ComparisonOperator::Gt.compare(a, b),
                ComparisonOperator::Gt.flipped().compare(b, a)
            );
        }
    }

    #[test]
    fn data_type_parses_from_snake_case() {
        use std::str::FromStr as _;

        assert_eq!(DataType::from_str("crime_rates").unwrap(), DataType::CrimeRates);
        assert_eq!(DataType::from_str("land_area").unwrap(), DataType::LandArea);
        assert!(DataType::from_str("altitude").is_err());
    }
}
