#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Embedded sample datasets and the [`DatasetStore`].
//!
//! Each `.json` file in `packages/geography/datasets/` is baked into the
//! binary at compile time via [`include_str!`]: one current-value table and
//! one five-year history table per metric, covering the 50 states + DC and
//! a dozen large counties. The store is the only dataset provider the CLI
//! and tests need; callers that have live data can construct a
//! [`DatasetStore`] from their own maps instead.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use map_data_geography_models::{Dataset, HistoricalDataset, RegionCode, RegionKind, fips};
use map_data_metrics_models::DataType;
use thiserror::Error;

/// Current-value tables embedded at compile time.
const DATASET_JSONS: &[(DataType, &str)] = &[
    (DataType::Population, include_str!("../datasets/population.json")),
    (DataType::CrimeRates, include_str!("../datasets/crime_rates.json")),
    (DataType::Income, include_str!("../datasets/income.json")),
    (DataType::Unemployment, include_str!("../datasets/unemployment.json")),
    (DataType::LandArea, include_str!("../datasets/land_area.json")),
];

/// Five-year history tables embedded at compile time.
const HISTORY_JSONS: &[(DataType, &str)] = &[
    (DataType::Population, include_str!("../datasets/history/population.json")),
    (DataType::CrimeRates, include_str!("../datasets/history/crime_rates.json")),
    (DataType::Income, include_str!("../datasets/history/income.json")),
    (DataType::Unemployment, include_str!("../datasets/history/unemployment.json")),
    (DataType::LandArea, include_str!("../datasets/history/land_area.json")),
];

/// Display names for the embedded counties.
const COUNTY_NAMES_JSON: &str = include_str!("../datasets/county_names.json");

/// Errors that can occur while building a store from raw JSON.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A dataset table failed to parse.
    #[error("Malformed dataset for {data_type}: {source}")]
    Malformed {
        /// The metric whose table was malformed.
        data_type: DataType,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// All datasets and histories, keyed by metric.
///
/// Immutable after construction; one process-wide instance backs the CLI
/// (see [`embedded`]).
#[derive(Debug, Clone)]
pub struct DatasetStore {
    datasets: BTreeMap<DataType, Dataset>,
    history: BTreeMap<DataType, HistoricalDataset>,
    county_names: BTreeMap<String, String>,
}

impl DatasetStore {
    /// Builds a store from pre-constructed datasets.
    #[must_use]
    pub fn new(datasets: Vec<Dataset>, history: Vec<HistoricalDataset>) -> Self {
        Self {
            datasets: datasets
                .into_iter()
                .map(|dataset| (dataset.data_type, dataset))
                .collect(),
            history: history
                .into_iter()
                .map(|series| (series.data_type, series))
                .collect(),
            county_names: BTreeMap::new(),
        }
    }

    /// Parses the embedded JSON tables into a store.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any embedded table is malformed.
    pub fn from_embedded() -> Result<Self, DatasetError> {
        let mut datasets = BTreeMap::new();
        for (data_type, json) in DATASET_JSONS {
            let values: BTreeMap<String, f64> =
                serde_json::from_str(json).map_err(|source| DatasetError::Malformed {
                    data_type: *data_type,
                    source,
                })?;
            datasets.insert(*data_type, Dataset::new(*data_type, values));
        }

        let mut history = BTreeMap::new();
        for (data_type, json) in HISTORY_JSONS {
            let series: BTreeMap<String, Vec<f64>> =
                serde_json::from_str(json).map_err(|source| DatasetError::Malformed {
                    data_type: *data_type,
                    source,
                })?;
            history.insert(*data_type, HistoricalDataset::new(*data_type, series));
        }

        let county_names: BTreeMap<String, String> = serde_json::from_str(COUNTY_NAMES_JSON)
            .map_err(|source| DatasetError::Malformed {
                data_type: DataType::Population,
                source,
            })?;

        log::debug!(
            "loaded {} datasets and {} histories from embedded tables",
            datasets.len(),
            history.len()
        );

        Ok(Self {
            datasets,
            history,
            county_names,
        })
    }

    /// The current-value dataset for a metric, if loaded.
    #[must_use]
    pub fn dataset(&self, data_type: DataType) -> Option<&Dataset> {
        self.datasets.get(&data_type)
    }

    /// The historical dataset for a metric, if loaded.
    #[must_use]
    pub fn history(&self, data_type: DataType) -> Option<&HistoricalDataset> {
        self.history.get(&data_type)
    }

    /// All region codes of one kind present in any dataset.
    #[must_use]
    pub fn regions_of(&self, kind: RegionKind) -> Vec<String> {
        let mut codes: Vec<String> = self
            .datasets
            .values()
            .flat_map(|dataset| dataset.iter_kind(kind).map(|(code, _)| code.to_string()))
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Human-readable label for a region code ("California",
    /// "Harris County, TX").
    #[must_use]
    pub fn region_label(&self, code: &str) -> String {
        let region = RegionCode::infer(code);
        match region.kind {
            RegionKind::State => fips::state_name(code).to_string(),
            RegionKind::County => self.county_names.get(code).map_or_else(
                || format!("county {code}"),
                |name| format!("{name}, {}", fips::state_abbr(region.state_prefix())),
            ),
        }
    }
}

/// The process-wide embedded store.
///
/// # Panics
///
/// Panics if any embedded JSON table is malformed (a compile-time
/// guarantee in practice, since the tables are baked into the binary).
#[must_use]
pub fn embedded() -> &'static DatasetStore {
    static STORE: LazyLock<DatasetStore> = LazyLock::new(|| {
        DatasetStore::from_embedded().unwrap_or_else(|e| panic!("embedded datasets: {e}"))
    });
    &STORE
}
