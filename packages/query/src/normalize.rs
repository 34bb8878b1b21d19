//! Token normalizers: raw text fragments to canonical tokens.
//!
//! Every function here is pure, takes an already-lowercased fragment, and
//! returns `None` on no match; none of them ever panics on user input.
//! Keyword tables are ordered longest-phrase-first so that "crime rates"
//! wins before "rate" and "no more than" before "more than".

use std::sync::LazyLock;

use map_data_geography_models::RegionKind;
use map_data_metrics_models::{ComparisonOperator, DataType, TrendDirection};
use map_data_query_models::TimePeriod;
use regex::Regex;

/// Synonym table for metric detection, longest phrase first.
const DATA_TYPE_SYNONYMS: &[(&str, DataType)] = &[
    ("crime rates", DataType::CrimeRates),
    ("crime rate", DataType::CrimeRates),
    ("median income", DataType::Income),
    ("household income", DataType::Income),
    ("land area", DataType::LandArea),
    ("square miles", DataType::LandArea),
    ("sq mi", DataType::LandArea),
    ("out of work", DataType::Unemployment),
    ("population", DataType::Population),
    ("residents", DataType::Population),
    ("people", DataType::Population),
    ("pop", DataType::Population),
    ("criminal", DataType::CrimeRates),
    ("crimes", DataType::CrimeRates),
    ("crime", DataType::CrimeRates),
    ("earnings", DataType::Income),
    ("salaries", DataType::Income),
    ("salary", DataType::Income),
    ("wages", DataType::Income),
    ("income", DataType::Income),
    ("unemployment", DataType::Unemployment),
    ("unemployed", DataType::Unemployment),
    ("jobless", DataType::Unemployment),
    ("area", DataType::LandArea),
    ("acreage", DataType::LandArea),
];

/// Comparison phrases, ordered so that longer phrases shadow their
/// substrings ("no more than" before "more than", ">=" before ">").
const OPERATOR_PHRASES: &[(&str, ComparisonOperator)] = &[
    ("no more than", ComparisonOperator::Lte),
    ("no less than", ComparisonOperator::Gte),
    ("at least", ComparisonOperator::Gte),
    ("at most", ComparisonOperator::Lte),
    (">=", ComparisonOperator::Gte),
    ("<=", ComparisonOperator::Lte),
    ("or more", ComparisonOperator::Gte),
    ("or less", ComparisonOperator::Lte),
    ("greater than", ComparisonOperator::Gt),
    ("more than", ComparisonOperator::Gt),
    ("higher than", ComparisonOperator::Gt),
    ("larger than", ComparisonOperator::Gt),
    ("less than", ComparisonOperator::Lt),
    ("fewer than", ComparisonOperator::Lt),
    ("lower than", ComparisonOperator::Lt),
    ("smaller than", ComparisonOperator::Lt),
    ("exceeding", ComparisonOperator::Gt),
    ("exceeds", ComparisonOperator::Gt),
    ("over", ComparisonOperator::Gt),
    ("above", ComparisonOperator::Gt),
    ("under", ComparisonOperator::Lt),
    ("below", ComparisonOperator::Lt),
    ("equal to", ComparisonOperator::Eq),
    ("equals", ComparisonOperator::Eq),
    ("exactly", ComparisonOperator::Eq),
    (">", ComparisonOperator::Gt),
    ("<", ComparisonOperator::Lt),
    ("=", ComparisonOperator::Eq),
];

const INCREASE_WORDS: &[&str] = &[
    "increasing",
    "increased",
    "increase",
    "rising",
    "risen",
    "rose",
    "growing",
    "grown",
    "grew",
    "going up",
    "gone up",
    "climbing",
];

const DECREASE_WORDS: &[&str] = &[
    "decreasing",
    "decreased",
    "decrease",
    "falling",
    "fallen",
    "fell",
    "declining",
    "declined",
    "decline",
    "dropping",
    "dropped",
    "shrinking",
    "going down",
    "gone down",
];

const STABLE_WORDS: &[&str] = &["stable", "steady", "flat", "unchanged", "constant"];

/// The recognized highlight colors, also used as heatmap scheme names.
pub const COLOR_WORDS: &[&str] = &[
    "red", "blue", "green", "yellow", "orange", "purple", "pink", "cyan", "magenta", "brown",
    "gray", "grey",
];

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(red|blue|green|yellow|orange|purple|pink|cyan|magenta|brown|gray|grey)\b")
        .expect("valid regex")
});

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid regex"));

static MAGNITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(billion|million|thousand|b|m|k)\b").expect("valid regex")
});

static PLAIN_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:,\d{3})*(?:\.\d+)?)").expect("valid regex"));

static MAJORITY_PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+(?:out\s+)?of\s+(?:the\s+)?(?:last|past)\s+(\d+)\s+years?")
        .expect("valid regex")
});

static RECENT_PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:last|past|previous)\s+(\d+)\s+years?").expect("valid regex")
});

/// Checks if `haystack` contains any of the given `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Recognizes the metric a fragment talks about.
#[must_use]
pub fn data_type(text: &str) -> Option<DataType> {
    DATA_TYPE_SYNONYMS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, data_type)| *data_type)
}

/// All distinct metrics mentioned in a fragment, ordered by first
/// occurrence.
#[must_use]
pub fn find_data_types(text: &str) -> Vec<DataType> {
    let mut found: Vec<(usize, DataType)> = Vec::new();
    for (keyword, data_type) in DATA_TYPE_SYNONYMS {
        if let Some(position) = text.find(keyword)
            && !found.iter().any(|(_, existing)| existing == data_type)
        {
            found.push((position, *data_type));
        }
    }
    found.sort_by_key(|(position, _)| *position);
    found.into_iter().map(|(_, data_type)| data_type).collect()
}

/// Recognizes the geographic unit a command targets. Defaults to states.
#[must_use]
pub fn target_kind(text: &str) -> RegionKind {
    if text.contains("county") || text.contains("counties") {
        RegionKind::County
    } else {
        RegionKind::State
    }
}

/// Recognizes an English comparison phrase or symbol.
#[must_use]
pub fn operator(text: &str) -> Option<ComparisonOperator> {
    OPERATOR_PHRASES
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map(|(_, operator)| *operator)
}

/// Byte offset just past the first operator phrase in `text`, for parsing
/// "income above 60000" style fragments left-to-right.
#[must_use]
pub fn operator_end(text: &str) -> Option<usize> {
    OPERATOR_PHRASES
        .iter()
        .find_map(|(phrase, _)| text.find(phrase).map(|start| start + phrase.len()))
}

/// Parses a number expression: percentages ("5%" → 0.05), magnitude words
/// ("3 million" → 3000000, "2 thousand" → 2000, "1.5m" → 1500000), and
/// plain comma-grouped decimals.
#[must_use]
pub fn number_expression(text: &str) -> Option<f64> {
    if let Some(captures) = PERCENT_RE.captures(text) {
        let value: f64 = captures[1].parse().ok()?;
        return Some(value / 100.0);
    }

    if let Some(captures) = MAGNITUDE_RE.captures(text) {
        let value: f64 = captures[1].parse().ok()?;
        let factor = match &captures[2] {
            "billion" | "b" => 1_000_000_000.0,
            "million" | "m" => 1_000_000.0,
            _ => 1_000.0,
        };
        return Some(value * factor);
    }

    let captures = PLAIN_NUMBER_RE.captures(text)?;
    captures[1].replace(',', "").parse().ok()
}

/// The raw text of the first number expression in `text`, for preserving
/// the user's phrasing in `original_value`.
#[must_use]
pub fn number_fragment(text: &str) -> Option<String> {
    if let Some(found) = PERCENT_RE.find(text) {
        return Some(found.as_str().to_string());
    }
    if let Some(found) = MAGNITUDE_RE.find(text) {
        return Some(found.as_str().to_string());
    }
    PLAIN_NUMBER_RE
        .find(text)
        .map(|found| found.as_str().to_string())
}

/// Classifies a trend phrase.
#[must_use]
pub fn trend(text: &str) -> Option<TrendDirection> {
    if contains_any(text, INCREASE_WORDS) {
        Some(TrendDirection::Increase)
    } else if contains_any(text, DECREASE_WORDS) {
        Some(TrendDirection::Decrease)
    } else if contains_any(text, STABLE_WORDS) {
        Some(TrendDirection::Stable)
    } else {
        None
    }
}

/// Whether the fragment contains any trend keyword at all.
#[must_use]
pub fn has_trend_keyword(text: &str) -> bool {
    trend(text).is_some()
}

/// Recognizes "last/past N years" (recent) and "X of the last Y years"
/// (majority, with threshold X). The majority form is checked first since
/// the recent form is a substring of it.
#[must_use]
pub fn time_period(text: &str) -> Option<TimePeriod> {
    if let Some(captures) = MAJORITY_PERIOD_RE.captures(text) {
        let threshold: usize = captures[1].parse().ok()?;
        let years: usize = captures[2].parse().ok()?;
        return Some(TimePeriod::Majority { years, threshold });
    }

    if let Some(captures) = RECENT_PERIOD_RE.captures(text) {
        let years: usize = captures[1].parse().ok()?;
        return Some(TimePeriod::Recent { years });
    }

    None
}

/// First color word in the fragment, if any.
#[must_use]
pub fn color(text: &str) -> Option<&'static str> {
    let found = COLOR_RE.find(text)?;
    COLOR_WORDS
        .iter()
        .find(|word| **word == found.as_str())
        .copied()
}

/// All color words in the fragment, in order of occurrence.
#[must_use]
pub fn colors(text: &str) -> Vec<&'static str> {
    COLOR_RE
        .find_iter(text)
        .filter_map(|found| {
            COLOR_WORDS
                .iter()
                .find(|word| **word == found.as_str())
                .copied()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_data_type_synonyms() {
        assert_eq!(data_type("where the pop is huge"), Some(DataType::Population));
        assert_eq!(data_type("crime rates are low"), Some(DataType::CrimeRates));
        assert_eq!(data_type("median income above"), Some(DataType::Income));
        assert_eq!(data_type("jobless numbers"), Some(DataType::Unemployment));
        assert_eq!(data_type("largest land area"), Some(DataType::LandArea));
        assert_eq!(data_type("show me everything"), None);
    }

    #[test]
    fn longest_phrase_wins() {
        // "land area" must not resolve through the bare "area" entry twice,
        // and "crime rates" must win before "crime".
        assert_eq!(data_type("land area"), Some(DataType::LandArea));
        assert_eq!(find_data_types("crime rates and income"), vec![
            DataType::CrimeRates,
            DataType::Income
        ]);
    }

    #[test]
    fn finds_data_types_in_first_seen_order() {
        let found = find_data_types("is unemployment lower than income");
        assert_eq!(found, vec![DataType::Unemployment, DataType::Income]);
    }

    #[test]
    fn recognizes_operators() {
        assert_eq!(operator("over 5 million"), Some(ComparisonOperator::Gt));
        assert_eq!(operator("below average"), Some(ComparisonOperator::Lt));
        assert_eq!(operator("at least 10"), Some(ComparisonOperator::Gte));
        assert_eq!(operator("no more than 3"), Some(ComparisonOperator::Lte));
        assert_eq!(operator("equal to 7"), Some(ComparisonOperator::Eq));
        assert_eq!(operator("nothing comparative"), None);
    }

    #[test]
    fn operator_end_points_past_phrase() {
        let text = "income above 60000";
        let end = operator_end(text).unwrap();
        assert_eq!(&text[end..], " 60000");
    }

    #[test]
    fn parses_number_expressions() {
        assert!((number_expression("5%").unwrap() - 0.05).abs() < 1e-12);
        assert!((number_expression("3 million").unwrap() - 3_000_000.0).abs() < f64::EPSILON);
        assert!((number_expression("2 thousand").unwrap() - 2_000.0).abs() < f64::EPSILON);
        assert!((number_expression("1.5m").unwrap() - 1_500_000.0).abs() < f64::EPSILON);
        assert!((number_expression("1,250,000").unwrap() - 1_250_000.0).abs() < f64::EPSILON);
        assert!((number_expression("0.1").unwrap() - 0.1).abs() < f64::EPSILON);
        assert_eq!(number_expression("no digits here"), None);
    }

    #[test]
    fn number_fragment_preserves_phrasing() {
        assert_eq!(number_fragment("over 10 million people").unwrap(), "10 million");
        assert_eq!(number_fragment("below 0.1").unwrap(), "0.1");
    }

    #[test]
    fn classifies_trends() {
        assert_eq!(trend("has been increasing"), Some(TrendDirection::Increase));
        assert_eq!(trend("crime dropped"), Some(TrendDirection::Decrease));
        assert_eq!(trend("stayed flat"), Some(TrendDirection::Stable));
        assert_eq!(trend("crime is high"), None);
    }

    #[test]
    fn parses_time_periods() {
        assert_eq!(
            time_period("over the last 3 years"),
            Some(TimePeriod::Recent { years: 3 })
        );
        assert_eq!(
            time_period("in 3 of the last 5 years"),
            Some(TimePeriod::Majority {
                years: 5,
                threshold: 3
            })
        );
        assert_eq!(
            time_period("4 out of the past 6 years"),
            Some(TimePeriod::Majority {
                years: 6,
                threshold: 4
            })
        );
        assert_eq!(time_period("recently"), None);
    }

    #[test]
    fn colors_respect_word_boundaries() {
        assert_eq!(color("in red"), Some("red"));
        // "hundred" must not read as "red".
        assert_eq!(color("one hundred"), None);
        assert_eq!(colors("green and red"), vec!["green", "red"]);
    }

    #[test]
    fn target_kind_defaults_to_state() {
        assert_eq!(target_kind("show counties"), RegionKind::County);
        assert_eq!(target_kind("show states"), RegionKind::State);
        assert_eq!(target_kind("show regions"), RegionKind::State);
    }
}
