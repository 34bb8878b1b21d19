//! Ranking evaluation: sorted, truncated result lists with a gradient.

use map_data_geography::DatasetStore;
use map_data_geography_models::RegionKind;
use map_data_metrics_models::DataType;
use map_data_query_models::RankDirection;

use crate::{HighlightMap, Treatment, gradient};

/// Regions of the target kind ordered by value in the given direction,
/// ties broken by region code for determinism.
fn ordered_regions(
    data_type: DataType,
    target: RegionKind,
    direction: RankDirection,
    store: &DatasetStore,
) -> Vec<(String, f64)> {
    let Some(dataset) = store.dataset(data_type) else {
        log::warn!("no dataset for {data_type}; empty ranking");
        return Vec::new();
    };

    let mut entries: Vec<(String, f64)> = dataset
        .iter_kind(target)
        .map(|(code, value)| (code.to_string(), value))
        .collect();

    entries.sort_by(|(code_a, value_a), (code_b, value_b)| {
        let by_value = match direction {
            RankDirection::Descending => value_b.partial_cmp(value_a),
            RankDirection::Ascending => value_a.partial_cmp(value_b),
        };
        by_value
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| code_a.cmp(code_b))
    });

    entries
}

/// Takes the first `count` regions by value and assigns each a gradient
/// treatment: intensity interpolates linearly from 1.0 at rank 1 down to
/// the floor at the last rank.
#[must_use]
pub fn apply_ranking(
    data_type: DataType,
    target: RegionKind,
    count: usize,
    direction: RankDirection,
    color: &str,
    store: &DatasetStore,
) -> HighlightMap {
    let taken: Vec<(String, f64)> = ordered_regions(data_type, target, direction, store)
        .into_iter()
        .take(count)
        .collect();
    let total = taken.len();

    taken
        .into_iter()
        .enumerate()
        .map(|(position, (code, _))| {
            let intensity = if total <= 1 {
                1.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                let fraction = position as f64 / (total - 1) as f64;
                (gradient::MIN_RANK_INTENSITY - 1.0).mul_add(fraction, 1.0)
            };
            (
                code,
                Treatment::Ranked {
                    color: color.to_string(),
                    hex: gradient::intensity_hex(color, intensity),
                    intensity,
                    rank: position + 1,
                },
            )
        })
        .collect()
}

/// Whether a region sits inside the top/bottom `percentage` of the
/// ranking. The cutoff rounds up, so a 10% slice of 51 regions keeps 6.
#[must_use]
pub fn within_percentage(
    data_type: DataType,
    target: RegionKind,
    direction: RankDirection,
    percentage: f64,
    code: &str,
    store: &DatasetStore,
) -> bool {
    let ordered = ordered_regions(data_type, target, direction, store);
    if ordered.is_empty() {
        return false;
    }

    #[allow(clippy::cast_precision_loss)]
    let slice = (percentage / 100.0 * ordered.len() as f64).ceil();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cutoff = (slice as usize).max(1);

    ordered
        .iter()
        .take(cutoff)
        .any(|(ranked_code, _)| ranked_code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_data_geography::embedded;

    #[test]
    fn top_five_by_income() {
        let store = embedded();
        let result = apply_ranking(
            DataType::Income,
            RegionKind::State,
            5,
            RankDirection::Descending,
            "blue",
            store,
        );

        assert_eq!(result.len(), 5);

        // DC has the highest income in the embedded data: rank 1, full
        // intensity.
        let Treatment::Ranked {
            rank, intensity, ..
        } = result.get("11").unwrap()
        else {
            panic!("expected ranked treatment");
        };
        assert_eq!(*rank, 1);
        assert!((intensity - 1.0).abs() < f64::EPSILON);

        // Hawaii is fifth: floor intensity.
        let Treatment::Ranked {
            rank, intensity, ..
        } = result.get("15").unwrap()
        else {
            panic!("expected ranked treatment");
        };
        assert_eq!(*rank, 5);
        assert!((intensity - gradient::MIN_RANK_INTENSITY).abs() < 1e-9);
    }

    #[test]
    fn ascending_puts_lowest_first() {
        let store = embedded();
        let result = apply_ranking(
            DataType::Population,
            RegionKind::State,
            3,
            RankDirection::Ascending,
            "green",
            store,
        );

        // Wyoming has the smallest population.
        let Treatment::Ranked { rank, .. } = result.get("56").unwrap() else {
            panic!("expected ranked treatment");
        };
        assert_eq!(*rank, 1);
    }

    #[test]
    fn count_clamps_to_available_regions() {
        let store = embedded();
        let result = apply_ranking(
            DataType::Income,
            RegionKind::County,
            500,
            RankDirection::Descending,
            "blue",
            store,
        );
        assert_eq!(result.len(), 12);
    }

    #[test]
    fn single_entry_gets_full_intensity() {
        let store = embedded();
        let result = apply_ranking(
            DataType::Income,
            RegionKind::State,
            1,
            RankDirection::Descending,
            "blue",
            store,
        );
        let Treatment::Ranked { intensity, .. } = result.values().next().unwrap() else {
            panic!("expected ranked treatment");
        };
        assert!((intensity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_cutoff_rounds_up() {
        let store = embedded();
        // 10% of 51 -> 6 regions; King County is not a state.
        assert!(within_percentage(
            DataType::Income,
            RegionKind::State,
            RankDirection::Descending,
            10.0,
            "11",
            store
        ));
        assert!(!within_percentage(
            DataType::Income,
            RegionKind::State,
            RankDirection::Descending,
            10.0,
            "28",
            store
        ));
    }
}
