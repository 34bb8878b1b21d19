#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query evaluator: a parsed [`Intent`] plus datasets in, region
//! treatments out.
//!
//! [`evaluate`] is a pure function; it owns no display state and never
//! fails. Evaluation-time data problems (a missing dataset, a region
//! without history) are logged and simply contribute no matches, so the
//! caller always receives a well-formed [`Evaluation`].

pub mod gradient;
pub mod stats;

mod analytical;
mod comparison;
mod filter;
mod ranking;
mod trend;

use std::collections::BTreeMap;

use map_data_geography::DatasetStore;
use map_data_metrics_models::DataType;
use map_data_query_models::{ClarifyCategory, Intent};
use serde::Serialize;

pub use filter::condition_matches;
pub use trend::analyze_time_trend;

/// Display treatment assigned to one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Treatment {
    /// A flat named color.
    Color {
        /// Color name ("yellow", "red", ...).
        color: String,
    },
    /// A concrete hex color (heatmaps).
    Hex {
        /// `#rrggbb`.
        hex: String,
    },
    /// A ranked gradient entry.
    Ranked {
        /// Gradient base color name.
        color: String,
        /// Concrete blended color.
        hex: String,
        /// Gradient intensity in `[0.3, 1.0]`; rank 1 is most intense.
        intensity: f64,
        /// 1-based rank position.
        rank: usize,
    },
}

/// Region code → treatment, the contract the rendering layer consumes.
pub type HighlightMap = BTreeMap<String, Treatment>;

/// The computed result of a bare analytical command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticReport {
    /// Registry name of the computed function.
    pub function_name: String,
    /// Metrics the computation ran over.
    pub data_types: Vec<DataType>,
    /// The result, in user-facing units.
    pub value: StatisticValue,
    /// Human-readable description of what was computed.
    pub description: String,
}

/// The shape of a statistic result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StatisticValue {
    /// A single number (mean, correlation, ...).
    Scalar {
        /// The value.
        value: f64,
    },
    /// The three quartile cut points.
    Quartiles {
        /// 25th percentile.
        q1: f64,
        /// 50th percentile.
        q2: f64,
        /// 75th percentile.
        q3: f64,
    },
    /// The summary aggregate.
    Summary {
        /// Number of values.
        count: usize,
        /// Arithmetic mean.
        mean: f64,
        /// Median.
        median: f64,
        /// Population standard deviation.
        std_dev: f64,
        /// Smallest value.
        min: f64,
        /// Largest value.
        max: f64,
    },
}

/// What evaluating an intent produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evaluation {
    /// Regions to highlight, with their treatments.
    Highlights {
        /// Region code → treatment.
        regions: HighlightMap,
    },
    /// A computed statistic (no highlighting).
    Statistic {
        /// The report.
        report: StatisticReport,
    },
    /// All highlights should be removed.
    Cleared,
    /// The command needs clarification; nothing was evaluated.
    Clarification {
        /// Why clarification is needed.
        category: ClarifyCategory,
        /// The clarification message.
        message: String,
        /// Example follow-up commands.
        suggestions: Vec<String>,
    },
    /// The command was not understood; nothing was evaluated.
    NoMatch {
        /// Example commands that would work.
        suggestions: Vec<String>,
    },
}

/// Evaluates an intent against the datasets in `store`.
#[must_use]
pub fn evaluate(intent: &Intent, store: &DatasetStore) -> Evaluation {
    match intent {
        Intent::HighlightRegion { region_code, color } => {
            let mut regions = HighlightMap::new();
            regions.insert(
                region_code.clone(),
                Treatment::Color {
                    color: color.clone(),
                },
            );
            Evaluation::Highlights { regions }
        }

        Intent::ClearHighlights => Evaluation::Cleared,

        Intent::SimpleHighlight {
            locations, color, ..
        } => {
            let regions = locations
                .iter()
                .map(|code| {
                    (
                        code.clone(),
                        Treatment::Color {
                            color: color.clone(),
                        },
                    )
                })
                .collect();
            Evaluation::Highlights { regions }
        }

        Intent::Heatmap {
            target,
            data_type,
            color_scheme,
        } => Evaluation::Highlights {
            regions: filter::apply_heatmap(*data_type, *target, color_scheme, store),
        },

        Intent::Filter {
            target, condition, ..
        } => Evaluation::Highlights {
            regions: filter::apply_single_filter(condition, *target, store),
        },

        Intent::MultiFilter {
            target,
            clauses,
            operator,
        } => Evaluation::Highlights {
            regions: filter::apply_multi_filter(clauses, *operator, *target, store),
        },

        Intent::MultiColorHighlight {
            target,
            colored_conditions,
        } => Evaluation::Highlights {
            regions: filter::apply_multi_color(colored_conditions, *target, store),
        },

        Intent::Ranking {
            target,
            data_type,
            count,
            direction,
            color,
        } => Evaluation::Highlights {
            regions: ranking::apply_ranking(*data_type, *target, *count, *direction, color, store),
        },

        Intent::Comparison {
            target,
            first_metric,
            second_metric,
            operator,
        } => Evaluation::Highlights {
            regions: comparison::apply_comparison(
                *first_metric,
                *second_metric,
                *operator,
                *target,
                store,
            ),
        },

        Intent::AnalyticalFunction {
            function_name,
            input,
        } => analytical::apply_function(function_name, *input, store).map_or_else(
            || Evaluation::NoMatch {
                suggestions: vec![format!(
                    "no data available to compute {function_name}"
                )],
            },
            |report| Evaluation::Statistic { report },
        ),

        Intent::AnalyticalFilter {
            function_name,
            data_types,
            operator,
            threshold,
            color,
            target,
        } => Evaluation::Highlights {
            regions: analytical::apply_analytical_filter(
                function_name,
                data_types,
                *operator,
                *threshold,
                color,
                *target,
                store,
            ),
        },

        Intent::AdvancedAnalyticalFilter {
            conditions,
            logic,
            color,
            target,
        } => Evaluation::Highlights {
            regions: analytical::apply_advanced(conditions, *logic, color, *target, store),
        },

        Intent::Clarify {
            category,
            message,
            suggestions,
        } => Evaluation::Clarification {
            category: *category,
            message: message.clone(),
            suggestions: suggestions.clone(),
        },

        Intent::Unknown { suggestions } => Evaluation::NoMatch {
            suggestions: suggestions.clone(),
        },
    }
}
