#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed intents and conditions produced by the command interpreter.
//!
//! [`Intent`] is the interpreter's entire output contract: interpretation
//! never fails, it only produces different variants (`Unknown` and
//! `Clarify` are the non-success terminals). The evaluator consumes these
//! values together with datasets; nothing here touches data.

use map_data_geography_models::RegionKind;
use map_data_metrics_models::{ComparisonOperator, DataType, TrendDirection};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sort direction for ranking queries.
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
pub enum RankDirection {
    /// Highest values first ("top", "most", "highest").
    #[serde(rename = "desc")]
    #[strum(serialize = "desc")]
    Descending,
    /// Lowest values first ("bottom", "least", "lowest").
    #[serde(rename = "asc")]
    #[strum(serialize = "asc")]
    Ascending,
}

/// Boolean combinator for multi-condition filters.
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
pub enum LogicOperator {
    /// All inclusion conditions must hold.
    And,
    /// At least one inclusion condition must hold.
    Or,
}

/// The window a trend is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TimePeriod {
    /// The trailing N years, compared end-to-end.
    Recent {
        /// Window length in years.
        years: usize,
    },
    /// "X of the last Y years": at least `threshold` year-over-year moves
    /// in the expected direction within the trailing `years` window.
    Majority {
        /// Window length in years.
        years: usize,
        /// Minimum number of year-over-year moves required.
        threshold: usize,
    },
}

impl Default for TimePeriod {
    fn default() -> Self {
        Self::Recent { years: 2 }
    }
}

/// One metric pair for a correlation measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPair {
    /// First metric.
    pub data_type_a: DataType,
    /// Second metric.
    pub data_type_b: DataType,
}

/// One testable predicate over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Condition {
    /// Stored value compared against a threshold.
    Value {
        /// Metric the threshold applies to.
        data_type: DataType,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Threshold in user-facing units.
        value: f64,
        /// The raw text fragment the value was parsed from, when numeric.
        original_value: Option<String>,
    },
    /// Directional change over a historical window.
    Trend {
        /// Metric whose history is examined.
        data_type: DataType,
        /// Expected direction.
        trend: TrendDirection,
        /// Window the direction is checked over.
        time_period: TimePeriod,
    },
    /// Stored value within an inclusive range.
    Range {
        /// Metric the range applies to.
        data_type: DataType,
        /// Lower bound in user-facing units.
        min_value: f64,
        /// Upper bound in user-facing units.
        max_value: f64,
    },
    /// Membership in the top/bottom percentage of a metric's ranking.
    Ranking {
        /// Metric regions are ranked by.
        data_type: DataType,
        /// Which end of the ranking qualifies.
        direction: RankDirection,
        /// Percentage of regions that qualify (0-100).
        percentage: f64,
    },
    /// A named statistical function of a region's history compared to a
    /// threshold.
    Statistical {
        /// Registry name of the function ("mean", "standard_deviation", ...).
        function_name: String,
        /// Metric the function is computed over.
        data_type: DataType,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Threshold the function result is compared against.
        threshold: f64,
    },
    /// Relative strength of two correlation measures.
    CorrelationComparison {
        /// First correlation pair.
        first: CorrelationPair,
        /// Second correlation pair.
        second: CorrelationPair,
        /// `Gt` for "stronger than", `Lt` for "weaker than".
        operator: ComparisonOperator,
    },
}

impl Condition {
    /// The metric a single-metric condition tests, if it has exactly one.
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Value { data_type, .. }
            | Self::Trend { data_type, .. }
            | Self::Range { data_type, .. }
            | Self::Ranking { data_type, .. }
            | Self::Statistical { data_type, .. } => Some(*data_type),
            Self::CorrelationComparison { .. } => None,
        }
    }
}

/// A condition inside a [`Intent::MultiFilter`], tagged with its polarity.
///
/// `exclude: true` marks an AND-NOT clause ("... but not high crime").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// The predicate.
    pub condition: Condition,
    /// Whether a match removes the region instead of including it.
    #[serde(default)]
    pub exclude: bool,
}

impl FilterClause {
    /// An inclusion clause.
    #[must_use]
    pub const fn include(condition: Condition) -> Self {
        Self {
            condition,
            exclude: false,
        }
    }

    /// An exclusion (AND-NOT) clause.
    #[must_use]
    pub const fn exclude(condition: Condition) -> Self {
        Self {
            condition,
            exclude: true,
        }
    }
}

/// A condition paired with its own display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoredCondition {
    /// The predicate.
    pub condition: Condition,
    /// Color for regions matching this predicate.
    pub color: String,
}

/// Input shape of an analytical function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "arity", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FunctionInput {
    /// One metric.
    Single {
        /// The metric.
        data_type: DataType,
    },
    /// Two metrics (correlation).
    Dual {
        /// First metric.
        data_type_x: DataType,
        /// Second metric.
        data_type_y: DataType,
    },
}

/// Why a command needed clarification.
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
pub enum ClarifyCategory {
    /// A qualitative word ("good", "bad") with no metric behind it.
    VagueQualitative,
    /// "high"/"low" with no metric named.
    MissingDataType,
    /// "top"/"bottom"/superlative with no metric named.
    IncompleteRanking,
    /// "compare" with fewer than two metrics named.
    ComparisonRequest,
    /// An explicit request for help.
    HelpRequest,
    /// Nothing recognizable at all.
    GeneralAmbiguous,
}

/// The structured result of interpreting one command string.
///
/// Interpretation is total: malformed input produces [`Intent::Unknown`]
/// or [`Intent::Clarify`], never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Highlight one region in a named color.
    HighlightRegion {
        /// FIPS code of the region.
        region_code: String,
        /// Highlight color.
        color: String,
    },
    /// Remove all highlights.
    ClearHighlights,
    /// Shade every region of a kind by its metric value.
    Heatmap {
        /// Region granularity.
        target: RegionKind,
        /// Metric that drives the shading.
        data_type: DataType,
        /// Named color ramp.
        color_scheme: String,
    },
    /// Highlight regions satisfying one condition.
    Filter {
        /// Region granularity.
        target: RegionKind,
        /// Metric the condition tests.
        data_type: DataType,
        /// The condition.
        condition: Condition,
    },
    /// Highlight regions satisfying a boolean combination of conditions.
    MultiFilter {
        /// Region granularity.
        target: RegionKind,
        /// Conditions with inclusion/exclusion polarity.
        clauses: Vec<FilterClause>,
        /// How inclusion clauses combine.
        operator: LogicOperator,
    },
    /// Several conditions, each with its own color.
    MultiColorHighlight {
        /// Region granularity.
        target: RegionKind,
        /// Condition/color pairs, evaluated independently.
        colored_conditions: Vec<ColoredCondition>,
    },
    /// The top/bottom N regions by a metric, with a ranking gradient.
    Ranking {
        /// Region granularity.
        target: RegionKind,
        /// Metric regions are ranked by.
        data_type: DataType,
        /// How many regions to keep.
        count: usize,
        /// Sort direction.
        direction: RankDirection,
        /// Base color of the gradient.
        color: String,
    },
    /// Regions where one metric's normalized score compares to another's.
    Comparison {
        /// Region granularity.
        target: RegionKind,
        /// Left-hand metric (first seen in the command).
        first_metric: DataType,
        /// Right-hand metric.
        second_metric: DataType,
        /// Comparison operator.
        operator: ComparisonOperator,
    },
    /// Highlight named locations in one color.
    SimpleHighlight {
        /// Region granularity.
        target: RegionKind,
        /// Resolved region codes, in command order.
        locations: Vec<String>,
        /// Highlight color.
        color: String,
        /// Whether more than one location was named.
        is_multiple: bool,
    },
    /// Compute a named statistic and report it (no highlighting).
    AnalyticalFunction {
        /// Registry name of the function.
        function_name: String,
        /// The metric(s) it applies to.
        input: FunctionInput,
    },
    /// Highlight regions where a statistic of their metrics passes a
    /// threshold.
    AnalyticalFilter {
        /// Registry name of the function.
        function_name: String,
        /// Metrics the function aggregates per region.
        data_types: Vec<DataType>,
        /// Comparison operator for the threshold.
        operator: ComparisonOperator,
        /// Threshold the per-region result is compared against.
        threshold: f64,
        /// Highlight color for survivors.
        color: String,
        /// Region granularity.
        target: RegionKind,
    },
    /// Highlight regions satisfying advanced analytical conditions.
    AdvancedAnalyticalFilter {
        /// The conditions (range, ranking-percentage, statistical,
        /// correlation-comparison, or plain value).
        conditions: Vec<Condition>,
        /// How the conditions combine.
        logic: LogicOperator,
        /// Highlight color for survivors.
        color: String,
        /// Region granularity.
        target: RegionKind,
    },
    /// The command was under-specified; ask the user to clarify.
    Clarify {
        /// What was missing from the command.
        category: ClarifyCategory,
        /// Fixed clarification message for the category.
        message: String,
        /// Example follow-up commands.
        suggestions: Vec<String>,
    },
    /// No branch matched; offer example commands.
    Unknown {
        /// Example commands the interpreter does understand.
        suggestions: Vec<String>,
    },
}

/// Catalog entry describing one analytical function.
///
/// Deserialized from the embedded registry TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Canonical registry name ("mean", "standard_deviation", ...).
    pub name: String,
    /// Accepted synonyms.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Functional grouping.
    pub category: FunctionCategory,
    /// How many datasets the function consumes.
    pub input_arity: InputArity,
    /// One-line description shown in search results.
    pub description: String,
}

/// Functional grouping of analytical functions.
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
pub enum FunctionCategory {
    /// Mean, median.
    CentralTendency,
    /// Standard deviation, variance, range.
    Dispersion,
    /// Min, max.
    Extremes,
    /// Correlation.
    Relationship,
    /// Sum, quartiles, summary.
    Descriptive,
}

/// Number of datasets an analytical function consumes.
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
pub enum InputArity {
    /// One dataset.
    Single,
    /// Two datasets (correlation).
    Dual,
}
