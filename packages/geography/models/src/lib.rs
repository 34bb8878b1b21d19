#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region identity and dataset container types.
//!
//! Region codes follow the census GEOID convention: a two-character FIPS
//! code identifies a state, a five-character code (state prefix + county
//! suffix) identifies a county. That length convention is applied in
//! exactly one place ([`RegionCode::infer`]); everything downstream reads
//! the explicit [`RegionKind`] tag instead of re-sniffing string lengths.

pub mod fips;

use std::collections::BTreeMap;

use map_data_metrics_models::DataType;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Granularity of a geographic region.
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
pub enum RegionKind {
    /// A US state (two-character FIPS code).
    State,
    /// A US county (five-character FIPS code, state prefix + county suffix).
    County,
}

impl RegionKind {
    /// Returns all region kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::State, Self::County]
    }

    /// Classifies a code by the GEOID length convention: codes of at most
    /// two characters are states, longer codes are counties.
    ///
    /// This is the only place the convention lives; keep it that way.
    #[must_use]
    pub const fn of_code(code: &str) -> Self {
        if code.len() <= 2 {
            Self::State
        } else {
            Self::County
        }
    }
}

/// A region identifier carrying its granularity explicitly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCode {
    /// The FIPS code ("06", "48201", ...).
    pub code: String,
    /// The granularity this code identifies.
    pub kind: RegionKind,
}

impl RegionCode {
    /// Creates a region code with an explicit kind.
    pub fn new(code: impl Into<String>, kind: RegionKind) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    /// Infers the kind from the GEOID length convention (see
    /// [`RegionKind::of_code`]).
    pub fn infer(code: impl Into<String>) -> Self {
        let code = code.into();
        let kind = RegionKind::of_code(&code);
        Self { code, kind }
    }

    /// The two-character state prefix of this code (the code itself for
    /// states).
    #[must_use]
    pub fn state_prefix(&self) -> &str {
        if self.code.len() >= 2 {
            &self.code[..2]
        } else {
            &self.code
        }
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// One metric's immutable region-code → value mapping.
///
/// States and counties share one map, distinguished by code length as
/// described on [`RegionCode::infer`]. Values use the metric's storage
/// units (see [`DataType::storage_divisor`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// The metric this dataset describes.
    pub data_type: DataType,
    /// Region code → stored value.
    pub values: BTreeMap<String, f64>,
}

impl Dataset {
    /// Creates a dataset from a pre-built map.
    #[must_use]
    pub const fn new(data_type: DataType, values: BTreeMap<String, f64>) -> Self {
        Self { data_type, values }
    }

    /// The stored value for a region, if present.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.values.get(code).copied()
    }

    /// Number of regions in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dataset has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(code, value)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(code, value)| (code.as_str(), *value))
    }

    /// Iterates `(code, value)` pairs restricted to one region kind.
    pub fn iter_kind(&self, kind: RegionKind) -> impl Iterator<Item = (&str, f64)> {
        self.iter()
            .filter(move |(code, _)| RegionKind::of_code(code) == kind)
    }

    /// All stored values for one region kind, in code order.
    #[must_use]
    pub fn values_of(&self, kind: RegionKind) -> Vec<f64> {
        self.iter_kind(kind).map(|(_, value)| value).collect()
    }
}

/// One metric's region-code → yearly series mapping.
///
/// Series are chronological (oldest first) over a fixed trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataset {
    /// The metric this history describes.
    pub data_type: DataType,
    /// Region code → chronological yearly values.
    pub series: BTreeMap<String, Vec<f64>>,
}

impl HistoricalDataset {
    /// Number of years each series covers.
    pub const WINDOW_YEARS: usize = 5;

    /// Creates a historical dataset from a pre-built map.
    #[must_use]
    pub const fn new(data_type: DataType, series: BTreeMap<String, Vec<f64>>) -> Self {
        Self { data_type, series }
    }

    /// The full series for a region, oldest first.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&[f64]> {
        self.series.get(code).map(Vec::as_slice)
    }

    /// The trailing `years` values of a region's series, oldest first.
    ///
    /// Returns the whole series when it is shorter than the window.
    #[must_use]
    pub fn trailing(&self, code: &str, years: usize) -> Option<&[f64]> {
        let series = self.get(code)?;
        let start = series.len().saturating_sub(years.max(2));
        Some(&series[start..])
    }
}
