//! Cross-metric comparison on the common 0-100 scale.

use map_data_geography::DatasetStore;
use map_data_geography_models::RegionKind;
use map_data_metrics_models::{ComparisonOperator, DataType};

use crate::{HighlightMap, Treatment, gradient};

/// Equality band on the normalized 0-100 scale.
const EQ_TOLERANCE: f64 = 1.0;

/// Highlights regions where the first metric's normalized score compares
/// to the second's.
///
/// Only regions present in both datasets participate; each metric is
/// projected onto the common 0-100 scale before the operator applies
/// (see `DataType::normalized_score`).
#[must_use]
pub fn apply_comparison(
    first: DataType,
    second: DataType,
    operator: ComparisonOperator,
    target: RegionKind,
    store: &DatasetStore,
) -> HighlightMap {
    let (Some(first_dataset), Some(second_dataset)) =
        (store.dataset(first), store.dataset(second))
    else {
        log::warn!("missing dataset for comparison of {first} and {second}");
        return HighlightMap::new();
    };

    first_dataset
        .iter_kind(target)
        .filter_map(|(code, first_value)| {
            let second_value = second_dataset.get(code)?;
            let first_score = first.normalized_score(first_value);
            let second_score = second.normalized_score(second_value);
            operator
                .compare_with_tolerance(first_score, second_score, EQ_TOLERANCE)
                .then(|| {
                    (
                        code.to_string(),
                        Treatment::Color {
                            color: gradient::COMPARISON_COLOR.to_string(),
                        },
                    )
                })
        })
        .collect()
}
