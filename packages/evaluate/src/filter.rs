//! Condition matching and the filter evaluators.
//!
//! A missing dataset or missing history is logged and contributes no
//! matches; filters never fail.

use map_data_geography::DatasetStore;
use map_data_geography_models::RegionKind;
use map_data_query_models::{ColoredCondition, Condition, FilterClause, LogicOperator};

use crate::{HighlightMap, Treatment, gradient, ranking, stats, trend};

/// Tests one condition against one region.
#[must_use]
pub fn condition_matches(
    condition: &Condition,
    code: &str,
    target: RegionKind,
    store: &DatasetStore,
) -> bool {
    match condition {
        Condition::Value {
            data_type,
            operator,
            value,
            ..
        } => {
            let Some(dataset) = store.dataset(*data_type) else {
                log::warn!("no dataset for {data_type}; condition matches nothing");
                return false;
            };
            let Some(stored) = dataset.get(code) else {
                return false;
            };
            operator.compare(stored, value / data_type.storage_divisor())
        }

        Condition::Trend {
            data_type,
            trend,
            time_period,
        } => {
            let Some(history) = store.history(*data_type) else {
                log::warn!("no history for {data_type}; trend matches nothing");
                return false;
            };
            history
                .get(code)
                .is_some_and(|series| trend::analyze_time_trend(series, *trend, *time_period))
        }

        Condition::Range {
            data_type,
            min_value,
            max_value,
        } => {
            let Some(dataset) = store.dataset(*data_type) else {
                log::warn!("no dataset for {data_type}; range matches nothing");
                return false;
            };
            let Some(stored) = dataset.get(code) else {
                return false;
            };
            let divisor = data_type.storage_divisor();
            stored >= min_value / divisor && stored <= max_value / divisor
        }

        Condition::Ranking {
            data_type,
            direction,
            percentage,
        } => ranking::within_percentage(*data_type, target, *direction, *percentage, code, store),

        Condition::Statistical {
            function_name,
            data_type,
            operator,
            threshold,
        } => {
            let divisor = data_type.storage_divisor();
            // The function applies to the region's history, scaled to
            // user-facing units; a region with no history falls back to
            // its current value.
            let series: Vec<f64> = store
                .history(*data_type)
                .and_then(|history| history.get(code))
                .map_or_else(
                    || {
                        store
                            .dataset(*data_type)
                            .and_then(|dataset| dataset.get(code))
                            .map(|value| vec![value * divisor])
                            .unwrap_or_default()
                    },
                    |series| series.iter().map(|value| value * divisor).collect(),
                );
            stats::by_name(function_name, &series)
                .is_some_and(|result| operator.compare(result, *threshold))
        }

        Condition::CorrelationComparison {
            first,
            second,
            operator,
        } => {
            let first_r = region_correlation(first.data_type_a, first.data_type_b, code, store);
            let second_r = region_correlation(second.data_type_a, second.data_type_b, code, store);
            match (first_r, second_r) {
                (Some(a), Some(b)) => operator.compare(a.abs(), b.abs()),
                _ => false,
            }
        }
    }
}

/// Pearson correlation of two metrics over one region's historical
/// series.
fn region_correlation(
    a: map_data_metrics_models::DataType,
    b: map_data_metrics_models::DataType,
    code: &str,
    store: &DatasetStore,
) -> Option<f64> {
    let series_a = store.history(a)?.get(code)?;
    let series_b = store.history(b)?.get(code)?;
    stats::correlation(series_a, series_b)
}

/// Highlights every region of the target kind matching one condition.
#[must_use]
pub fn apply_single_filter(
    condition: &Condition,
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    store
        .regions_of(target)
        .into_iter()
        .filter(|code| condition_matches(condition, code, target, store))
        .map(|code| {
            (
                code,
                Treatment::Color {
                    color: gradient::DEFAULT_FILTER_COLOR.to_string(),
                },
            )
        })
        .collect()
}

/// Highlights regions satisfying a boolean combination of clauses.
///
/// Inclusion clauses combine under the operator (AND: all, OR: any);
/// a region matching **any** exclusion clause is removed regardless.
#[must_use]
pub fn apply_multi_filter(
    clauses: &[FilterClause],
    operator: LogicOperator,
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    let (exclusions, inclusions): (Vec<&FilterClause>, Vec<&FilterClause>) =
        clauses.iter().partition(|clause| clause.exclude);

    store
        .regions_of(target)
        .into_iter()
        .filter(|code| {
            let included = match operator {
                LogicOperator::And => inclusions
                    .iter()
                    .all(|clause| condition_matches(&clause.condition, code, target, store)),
                LogicOperator::Or => inclusions
                    .iter()
                    .any(|clause| condition_matches(&clause.condition, code, target, store)),
            };
            let excluded = exclusions
                .iter()
                .any(|clause| condition_matches(&clause.condition, code, target, store));
            included && !excluded
        })
        .map(|code| {
            (
                code,
                Treatment::Color {
                    color: gradient::DEFAULT_FILTER_COLOR.to_string(),
                },
            )
        })
        .collect()
}

/// Evaluates each colored condition independently and merges the partial
/// maps; regions claimed by more than one condition get the reserved
/// overlap color.
#[must_use]
pub fn apply_multi_color(
    colored_conditions: &[ColoredCondition],
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    let mut merged = HighlightMap::new();

    for colored in colored_conditions {
        for code in store.regions_of(target) {
            if !condition_matches(&colored.condition, &code, target, store) {
                continue;
            }
            merged
                .entry(code)
                .and_modify(|treatment| {
                    *treatment = Treatment::Color {
                        color: gradient::OVERLAP_COLOR.to_string(),
                    };
                })
                .or_insert_with(|| Treatment::Color {
                    color: colored.color.clone(),
                });
        }
    }

    merged
}

/// Shades every region of the target kind by its metric value.
#[must_use]
pub fn apply_heatmap(
    data_type: map_data_metrics_models::DataType,
    target: RegionKind,
    scheme: &str,
    store: &DatasetStore,
) -> HighlightMap {
    let Some(dataset) = store.dataset(data_type) else {
        log::warn!("no dataset for {data_type}; empty heatmap");
        return HighlightMap::new();
    };

    let values = dataset.values_of(target);
    let (Some(min), Some(max)) = (stats::min(&values), stats::max(&values)) else {
        return HighlightMap::new();
    };

    dataset
        .iter_kind(target)
        .map(|(code, value)| {
            (
                code.to_string(),
                Treatment::Hex {
                    hex: gradient::heatmap_hex(value, min, max, scheme),
                },
            )
        })
        .collect()
}
