//! Analytical function evaluation: bare statistics reports and
//! statistic-driven filters.

use map_data_geography::DatasetStore;
use map_data_geography_models::RegionKind;
use map_data_metrics_models::{ComparisonOperator, DataType};
use map_data_query_models::{Condition, FunctionInput, LogicOperator};

use crate::filter::condition_matches;
use crate::{HighlightMap, StatisticReport, StatisticValue, Treatment, stats};

/// Computes a bare statistic over the state-level data and reports it.
///
/// Values are scaled to user-facing units before the computation so the
/// report reads in dollars and people, not storage units. Returns `None`
/// when the dataset is missing or empty.
#[must_use]
pub fn apply_function(
    function_name: &str,
    input: FunctionInput,
    store: &DatasetStore,
) -> Option<StatisticReport> {
    match input {
        FunctionInput::Single { data_type } => {
            let values = user_facing_values(data_type, store)?;
            let value = match function_name {
                "quartiles" => {
                    let q = stats::quartiles(&values)?;
                    StatisticValue::Quartiles {
                        q1: q.q1,
                        q2: q.q2,
                        q3: q.q3,
                    }
                }
                "summary" => {
                    let s = stats::summary(&values)?;
                    StatisticValue::Summary {
                        count: s.count,
                        mean: s.mean,
                        median: s.median,
                        std_dev: s.std_dev,
                        min: s.min,
                        max: s.max,
                    }
                }
                name => StatisticValue::Scalar {
                    value: stats::by_name(name, &values)?,
                },
            };

            Some(StatisticReport {
                function_name: function_name.to_string(),
                data_types: vec![data_type],
                value,
                description: format!("{function_name} of {} across states", data_type.label()),
            })
        }

        FunctionInput::Dual {
            data_type_x,
            data_type_y,
        } => {
            let (xs, ys) = paired_values(data_type_x, data_type_y, store)?;
            let r = stats::correlation(&xs, &ys)?;

            Some(StatisticReport {
                function_name: function_name.to_string(),
                data_types: vec![data_type_x, data_type_y],
                value: StatisticValue::Scalar { value: r },
                description: format!(
                    "correlation between {} and {} across states",
                    data_type_x.label(),
                    data_type_y.label()
                ),
            })
        }
    }
}

/// Highlights regions where a statistic of their metric values passes the
/// threshold.
///
/// For correlation the per-region measure runs over the two metrics'
/// historical series; for everything else the function aggregates the
/// region's current values across the requested metrics, scaled to
/// user-facing units.
#[must_use]
pub fn apply_analytical_filter(
    function_name: &str,
    data_types: &[DataType],
    operator: ComparisonOperator,
    threshold: f64,
    color: &str,
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    store
        .regions_of(target)
        .into_iter()
        .filter(|code| {
            region_statistic(function_name, data_types, code, store)
                .is_some_and(|value| operator.compare(value, threshold))
        })
        .map(|code| {
            (
                code,
                Treatment::Color {
                    color: color.to_string(),
                },
            )
        })
        .collect()
}

/// Highlights regions satisfying the advanced condition set under and/or.
#[must_use]
pub fn apply_advanced(
    conditions: &[Condition],
    logic: LogicOperator,
    color: &str,
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    store
        .regions_of(target)
        .into_iter()
        .filter(|code| match logic {
            LogicOperator::And => conditions
                .iter()
                .all(|condition| condition_matches(condition, code, target, store)),
            LogicOperator::Or => conditions
                .iter()
                .any(|condition| condition_matches(condition, code, target, store)),
        })
        .map(|code| {
            (
                code,
                Treatment::Color {
                    color: color.to_string(),
                },
            )
        })
        .collect()
}

/// One region's statistic for the analytical filter.
fn region_statistic(
    function_name: &str,
    data_types: &[DataType],
    code: &str,
    store: &DatasetStore,
) -> Option<f64> {
    if function_name == "correlation" {
        if data_types.len() < 2 {
            log::warn!("correlation filter needs two metrics");
            return None;
        }
        let series_a = store.history(data_types[0])?.get(code)?;
        let series_b = store.history(data_types[1])?.get(code)?;
        return stats::correlation(series_a, series_b);
    }

    let values: Vec<f64> = data_types
        .iter()
        .filter_map(|data_type| {
            store
                .dataset(*data_type)
                .and_then(|dataset| dataset.get(code))
                .map(|value| value * data_type.storage_divisor())
        })
        .collect();

    if values.len() != data_types.len() {
        return None;
    }
    stats::by_name(function_name, &values)
}

/// All state-level values of a metric, scaled to user-facing units.
fn user_facing_values(data_type: DataType, store: &DatasetStore) -> Option<Vec<f64>> {
    let dataset = store.dataset(data_type).or_else(|| {
        log::warn!("no dataset for {data_type}");
        None
    })?;
    let divisor = data_type.storage_divisor();
    let values: Vec<f64> = dataset
        .values_of(RegionKind::State)
        .iter()
        .map(|value| value * divisor)
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Paired state-level values for regions present in both datasets.
fn paired_values(
    first: DataType,
    second: DataType,
    store: &DatasetStore,
) -> Option<(Vec<f64>, Vec<f64>)> {
    let first_dataset = store.dataset(first)?;
    let second_dataset = store.dataset(second)?;

    let pairs: (Vec<f64>, Vec<f64>) = first_dataset
        .iter_kind(RegionKind::State)
        .filter_map(|(code, x)| second_dataset.get(code).map(|y| (x, y)))
        .unzip();

    (pairs.0.len() >= 2).then_some(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_data_geography::embedded;
    use map_data_query_models::RankDirection;

    #[test]
    fn mean_income_reports_in_dollars() {
        let store = embedded();
        let report = apply_function(
            "mean",
            FunctionInput::Single {
                data_type: DataType::Income,
            },
            store,
        )
        .unwrap();

        let StatisticValue::Scalar { value } = report.value else {
            panic!("expected scalar");
        };
        // State median incomes are tens of thousands of dollars.
        assert!(value > 40_000.0 && value < 100_000.0, "{value}");
    }

    #[test]
    fn correlation_report_is_bounded() {
        let store = embedded();
        let report = apply_function(
            "correlation",
            FunctionInput::Dual {
                data_type_x: DataType::Income,
                data_type_y: DataType::CrimeRates,
            },
            store,
        )
        .unwrap();

        let StatisticValue::Scalar { value } = report.value else {
            panic!("expected scalar");
        };
        assert!((-1.0..=1.0).contains(&value));
    }

    #[test]
    fn quartiles_and_summary_have_structured_values() {
        let store = embedded();
        let input = FunctionInput::Single {
            data_type: DataType::Population,
        };

        let report = apply_function("quartiles", input, store).unwrap();
        let StatisticValue::Quartiles { q1, q2, q3 } = report.value else {
            panic!("expected quartiles");
        };
        assert!(q1 <= q2 && q2 <= q3);

        let report = apply_function("summary", input, store).unwrap();
        assert!(matches!(report.value, StatisticValue::Summary { .. }));
    }

    #[test]
    fn analytical_filter_on_single_metric() {
        let store = embedded();
        let result = apply_analytical_filter(
            "mean",
            &[DataType::Income],
            ComparisonOperator::Gt,
            60_000.0,
            "yellow",
            RegionKind::State,
            store,
        );

        // With one metric, "mean" is the value itself: same as a plain
        // income > 60000 filter.
        let income = store.dataset(DataType::Income).unwrap();
        for code in result.keys() {
            assert!(income.get(code).unwrap() > 60.0);
        }
        assert!(result.contains_key("24"));
        assert!(!result.contains_key("28"));
    }

    #[test]
    fn correlation_filter_uses_history() {
        let store = embedded();
        let result = apply_analytical_filter(
            "correlation",
            &[DataType::Income, DataType::CrimeRates],
            ComparisonOperator::Gt,
            -2.0,
            "yellow",
            RegionKind::State,
            store,
        );
        // Threshold below -1 admits every region with usable history.
        assert!(!result.is_empty());
    }

    #[test]
    fn advanced_range_and_ranking_combination() {
        let store = embedded();
        let conditions = vec![
            Condition::Range {
                data_type: DataType::Population,
                min_value: 5_000_000.0,
                max_value: 30_000_000.0,
            },
            Condition::Ranking {
                data_type: DataType::Income,
                direction: RankDirection::Descending,
                percentage: 50.0,
            },
        ];

        let result = apply_advanced(
            &conditions,
            LogicOperator::And,
            "green",
            RegionKind::State,
            store,
        );

        let population = store.dataset(DataType::Population).unwrap();
        for code in result.keys() {
            let stored = population.get(code).unwrap();
            assert!((5.0..=30.0).contains(&stored), "{code}");
        }
        // Texas: 29.15M population, income 63.8k (top half).
        assert!(result.contains_key("48"));
        // California exceeds the population range.
        assert!(!result.contains_key("06"));
    }

    #[test]
    fn missing_metric_yields_no_matches() {
        let store = embedded();
        let result = apply_analytical_filter(
            "nonexistent_function",
            &[DataType::Income],
            ComparisonOperator::Gt,
            0.0,
            "yellow",
            RegionKind::State,
            store,
        );
        assert!(result.is_empty());
    }
}
