//! Condition parsers: one clause of text to one condition shape.
//!
//! Each parser composes the token normalizers and returns `None` when any
//! required piece (metric, operator, value) cannot be determined; the
//! dispatcher treats that as "this branch does not apply" and falls
//! through to the next one.

use std::sync::LazyLock;

use map_data_metrics_models::{ComparisonOperator, DataType};
use map_data_query_models::{
    Condition, CorrelationPair, FilterClause, LogicOperator, RankDirection,
};
use regex::Regex;

use crate::normalize;
use crate::registry;

/// Qualitative words meaning "more than the high threshold".
const HIGH_WORDS: &[&str] = &["high", "large", "big", "huge"];

/// Qualitative words meaning "less than the low threshold".
const LOW_WORDS: &[&str] = &["low", "small", "tiny", "little"];

/// NOT-logic separators, checked before and/or. Order matters: the first
/// one found in the command wins.
pub const NOT_SEPARATORS: &[&str] = &[" but not ", " except ", " without ", " excluding ", " not with "];

const DESCENDING_WORDS: &[&str] = &["top", "highest", "best", "most", "maximum"];
const ASCENDING_WORDS: &[&str] = &["bottom", "lowest", "worst", "least", "minimum"];

static RANK_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:top|bottom)\s+(\d+)\b").expect("valid regex"));

static UNIT_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+(?:states|counties)\b").expect("valid regex"));

static RANK_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(top|bottom)\s+(\d+(?:\.\d+)?)\s*(?:%|percent)").expect("valid regex")
});

static CORRELATION_COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"correlation between (.+?) and (.+?) is (stronger|weaker|higher|lower) than (?:the )?correlation between (.+?) and (.+)",
    )
    .expect("valid regex")
});

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"between\s+(\d[\d,.]*(?:\s*(?:billion|million|thousand|b|m|k))?)\s+and\s+(\d[\d,.]*(?:\s*(?:billion|million|thousand|b|m|k))?)")
        .expect("valid regex")
});

/// Whether a token appears as a whole word in the clause.
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

fn has_any_word(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| has_word(text, word))
}

/// Parses a value-threshold clause like "income above 60000" or
/// "high crime".
///
/// Explicit operator + number pairs win; qualitative words ("high",
/// "low", "above/below average") fall back to the per-metric threshold
/// table. Returns `None` unless metric, operator, and value all resolve.
#[must_use]
pub fn value_condition(clause: &str) -> Option<Condition> {
    let data_type = normalize::data_type(clause)?;

    // Explicit numeric threshold: prefer the number after the operator
    // phrase so "3 of the last 5 years" style prefixes don't bleed in.
    if let Some(end) = normalize::operator_end(clause) {
        let operator = normalize::operator(clause)?;
        let tail = &clause[end..];
        if let Some(value) = normalize::number_expression(tail) {
            return Some(Condition::Value {
                data_type,
                operator,
                value,
                original_value: normalize::number_fragment(tail),
            });
        }
        // "above average" style: operator present, no number.
        if tail.trim_start().starts_with("average") {
            let thresholds = data_type.qualitative_thresholds();
            let (operator, value) = match operator {
                ComparisonOperator::Lt | ComparisonOperator::Lte => {
                    (ComparisonOperator::Lt, thresholds.low)
                }
                _ => (ComparisonOperator::Gt, thresholds.high),
            };
            return Some(Condition::Value {
                data_type,
                operator,
                value,
                original_value: None,
            });
        }
    }

    // Qualitative threshold: "high income", "small land area".
    let thresholds = data_type.qualitative_thresholds();
    if has_any_word(clause, HIGH_WORDS) {
        return Some(Condition::Value {
            data_type,
            operator: ComparisonOperator::Gt,
            value: thresholds.high,
            original_value: None,
        });
    }
    if has_any_word(clause, LOW_WORDS) {
        return Some(Condition::Value {
            data_type,
            operator: ComparisonOperator::Lt,
            value: thresholds.low,
            original_value: None,
        });
    }

    None
}

/// Parses a trend clause like "population has been increasing over the
/// last 3 years". The window defaults to the two most recent years.
#[must_use]
pub fn trend_condition(clause: &str) -> Option<Condition> {
    let data_type = normalize::data_type(clause)?;
    let trend = normalize::trend(clause)?;
    let time_period = normalize::time_period(clause).unwrap_or_default();

    Some(Condition::Trend {
        data_type,
        trend,
        time_period,
    })
}

/// Everything needed to build a ranking intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingInfo {
    /// How many regions to keep.
    pub count: usize,
    /// Sort direction.
    pub direction: RankDirection,
    /// Metric regions are ranked by.
    pub data_type: DataType,
    /// Gradient base color.
    pub color: String,
}

/// Parses ranking parameters from a whole command: an explicit "top N" /
/// "N states" count (default 5 for bare superlatives), a direction word,
/// a metric, and an optional color (default blue).
#[must_use]
pub fn ranking_info(text: &str) -> Option<RankingInfo> {
    let direction = if has_any_word(text, DESCENDING_WORDS) {
        RankDirection::Descending
    } else if has_any_word(text, ASCENDING_WORDS) {
        RankDirection::Ascending
    } else {
        return None;
    };

    let count = RANK_COUNT_RE
        .captures(text)
        .or_else(|| UNIT_COUNT_RE.captures(text))
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(5);

    let data_type = normalize::data_type(text)?;
    let color = normalize::color(text).unwrap_or("blue").to_string();

    Some(RankingInfo {
        count,
        direction,
        data_type,
        color,
    })
}

/// Parses a cross-metric comparison: the first two distinct metrics in
/// first-seen order, plus a direction phrase.
///
/// Returns `None` with fewer than two distinct metrics. A bare "compare X
/// and Y" with no direction phrase reads as "higher than".
#[must_use]
pub fn comparison_info(text: &str) -> Option<(DataType, DataType, ComparisonOperator)> {
    let found = normalize::find_data_types(text);
    if found.len() < 2 {
        return None;
    }

    let operator = if normalize::contains_any(
        text,
        &["lower than", "less than", "smaller than", "fewer than"],
    ) {
        ComparisonOperator::Lt
    } else {
        ComparisonOperator::Gt
    };

    Some((found[0], found[1], operator))
}

/// Splits a multi-condition command into polarized clauses.
///
/// NOT-logic separators are detected before and/or: everything after the
/// first NOT separator becomes exclusion clauses and the operator is
/// "and". Otherwise the command splits on whichever of "and"/"or"
/// appears first. Each clause parses as a trend condition when it
/// contains a trend keyword, else a value condition; any unparsable
/// clause fails the whole parse.
#[must_use]
pub fn multi_conditional(text: &str) -> Option<(Vec<FilterClause>, LogicOperator)> {
    if let Some((separator, position)) = NOT_SEPARATORS
        .iter()
        .filter_map(|separator| text.find(separator).map(|position| (*separator, position)))
        .min_by_key(|(_, position)| *position)
    {
        let included = &text[..position];
        let excluded = &text[position + separator.len()..];

        let mut clauses: Vec<FilterClause> = split_clauses(included)
            .into_iter()
            .map(|clause| single_condition(clause).map(FilterClause::include))
            .collect::<Option<Vec<_>>>()?;
        let exclusions: Vec<FilterClause> = split_clauses(excluded)
            .into_iter()
            .map(|clause| single_condition(clause).map(FilterClause::exclude))
            .collect::<Option<Vec<_>>>()?;

        if clauses.is_empty() || exclusions.is_empty() {
            return None;
        }
        clauses.extend(exclusions);
        return Some((clauses, LogicOperator::And));
    }

    // When both keywords appear, whichever comes first in the string wins.
    let operator = match (text.find(" and "), text.find(" or ")) {
        (Some(and_position), Some(or_position)) => {
            if or_position < and_position {
                LogicOperator::Or
            } else {
                LogicOperator::And
            }
        }
        (Some(_), None) => LogicOperator::And,
        (None, Some(_)) => LogicOperator::Or,
        (None, None) => return None,
    };

    let separator = match operator {
        LogicOperator::And => " and ",
        LogicOperator::Or => " or ",
    };

    let clauses: Vec<FilterClause> = text
        .split(separator)
        .map(|clause| single_condition(clause).map(FilterClause::include))
        .collect::<Option<Vec<_>>>()?;

    if clauses.len() < 2 {
        return None;
    }

    Some((clauses, operator))
}

/// One clause: trend when it talks about change, else a value threshold.
#[must_use]
pub fn single_condition(clause: &str) -> Option<Condition> {
    if normalize::has_trend_keyword(clause) {
        trend_condition(clause)
    } else {
        value_condition(clause)
    }
}

fn split_clauses(text: &str) -> Vec<&str> {
    let separator = if text.contains(" and ") {
        " and "
    } else if text.contains(" or ") {
        " or "
    } else {
        return vec![text];
    };
    text.split(separator).collect()
}

/// Parses a "top/bottom N% for X" ranking-percentage condition.
#[must_use]
pub fn ranking_percentage_condition(text: &str) -> Option<Condition> {
    let captures = RANK_PERCENT_RE.captures(text)?;
    let direction = if &captures[1] == "top" {
        RankDirection::Descending
    } else {
        RankDirection::Ascending
    };
    let percentage: f64 = captures[2].parse().ok()?;
    let data_type = normalize::data_type(text)?;

    Some(Condition::Ranking {
        data_type,
        direction,
        percentage,
    })
}

/// Parses "correlation between A and B is stronger/weaker than
/// correlation between C and D".
#[must_use]
pub fn correlation_comparison_condition(text: &str) -> Option<Condition> {
    let captures = CORRELATION_COMPARISON_RE.captures(text)?;

    let first = CorrelationPair {
        data_type_a: normalize::data_type(&captures[1])?,
        data_type_b: normalize::data_type(&captures[2])?,
    };
    let second = CorrelationPair {
        data_type_a: normalize::data_type(&captures[4])?,
        data_type_b: normalize::data_type(&captures[5])?,
    };
    let operator = match &captures[3] {
        "stronger" | "higher" => ComparisonOperator::Gt,
        _ => ComparisonOperator::Lt,
    };

    Some(Condition::CorrelationComparison {
        first,
        second,
        operator,
    })
}

/// Parses "X between N and M" into a range condition.
#[must_use]
pub fn range_condition(text: &str) -> Option<Condition> {
    let data_type = normalize::data_type(text)?;
    let captures = RANGE_RE.captures(text)?;
    let min_value = normalize::number_expression(&captures[1])?;
    let max_value = normalize::number_expression(&captures[2])?;
    if min_value > max_value {
        return None;
    }

    Some(Condition::Range {
        data_type,
        min_value,
        max_value,
    })
}

/// Parses a statistical clause like "average income is above 60000".
#[must_use]
pub fn statistical_condition(clause: &str) -> Option<Condition> {
    let descriptor = registry::find_function_mention(clause)?;
    let data_type = normalize::data_type(clause)?;
    let operator = normalize::operator(clause)?;
    let end = normalize::operator_end(clause)?;
    let threshold = normalize::number_expression(&clause[end..])?;

    Some(Condition::Statistical {
        function_name: descriptor.name.clone(),
        data_type,
        operator,
        threshold,
    })
}

/// Parses the advanced analytical condition family, in priority order:
/// ranking percentage, correlation comparison, range, then a generic
/// and/or split of statistical or plain value clauses.
#[must_use]
pub fn advanced_conditions(text: &str) -> Option<(Vec<Condition>, LogicOperator)> {
    if let Some(condition) = ranking_percentage_condition(text) {
        return Some((vec![condition], LogicOperator::And));
    }
    if let Some(condition) = correlation_comparison_condition(text) {
        return Some((vec![condition], LogicOperator::And));
    }
    if let Some(condition) = range_condition(text) {
        return Some((vec![condition], LogicOperator::And));
    }

    let operator = if text.contains(" or ") && !text.contains(" and ") {
        LogicOperator::Or
    } else {
        LogicOperator::And
    };

    let conditions: Vec<Condition> = split_clauses(text)
        .into_iter()
        .map(|clause| statistical_condition(clause).or_else(|| value_condition(clause)))
        .collect::<Option<Vec<_>>>()?;

    if conditions.is_empty() {
        return None;
    }

    Some((conditions, operator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_data_query_models::TimePeriod;
    use map_data_metrics_models::TrendDirection;

    #[test]
    fn parses_explicit_numeric_condition() {
        let condition = value_condition("population over 10 million").unwrap();
        assert_eq!(
            condition,
            Condition::Value {
                data_type: DataType::Population,
                operator: ComparisonOperator::Gt,
                value: 10_000_000.0,
                original_value: Some("10 million".to_string()),
            }
        );
    }

    #[test]
    fn parses_qualitative_condition_from_threshold_table() {
        let condition = value_condition("high crime").unwrap();
        assert_eq!(
            condition,
            Condition::Value {
                data_type: DataType::CrimeRates,
                operator: ComparisonOperator::Gt,
                value: 0.10,
                original_value: None,
            }
        );

        let condition = value_condition("low unemployment").unwrap();
        assert_eq!(
            condition,
            Condition::Value {
                data_type: DataType::Unemployment,
                operator: ComparisonOperator::Lt,
                value: 0.06,
                original_value: None,
            }
        );
    }

    #[test]
    fn above_average_uses_high_threshold() {
        let condition = value_condition("income above average").unwrap();
        assert_eq!(
            condition,
            Condition::Value {
                data_type: DataType::Income,
                operator: ComparisonOperator::Gt,
                value: 65_000.0,
                original_value: None,
            }
        );
    }

    #[test]
    fn higher_than_is_not_read_as_qualitative_high() {
        let condition = value_condition("crime rates higher than 0.05").unwrap();
        let Condition::Value { operator, value, .. } = condition else {
            panic!("expected value condition");
        };
        assert_eq!(operator, ComparisonOperator::Gt);
        assert!((value - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn value_condition_requires_all_parts() {
        assert!(value_condition("population").is_none());
        assert!(value_condition("over 10 million").is_none());
        assert!(value_condition("something else entirely").is_none());
    }

    #[test]
    fn parses_trend_condition_with_default_window() {
        let condition = trend_condition("crime has been decreasing").unwrap();
        assert_eq!(
            condition,
            Condition::Trend {
                data_type: DataType::CrimeRates,
                trend: TrendDirection::Decrease,
                time_period: TimePeriod::Recent { years: 2 },
            }
        );
    }

    #[test]
    fn parses_trend_condition_with_majority_window() {
        let condition =
            trend_condition("income increased in 3 of the last 5 years").unwrap();
        assert_eq!(
            condition,
            Condition::Trend {
                data_type: DataType::Income,
                trend: TrendDirection::Increase,
                time_period: TimePeriod::Majority {
                    years: 5,
                    threshold: 3
                },
            }
        );
    }

    #[test]
    fn parses_ranking_info() {
        let info = ranking_info("show top 5 states by income in blue").unwrap();
        assert_eq!(info.count, 5);
        assert_eq!(info.direction, RankDirection::Descending);
        assert_eq!(info.data_type, DataType::Income);
        assert_eq!(info.color, "blue");
    }

    #[test]
    fn ranking_defaults() {
        let info = ranking_info("which states have the highest population").unwrap();
        assert_eq!(info.count, 5);
        assert_eq!(info.direction, RankDirection::Descending);
        assert_eq!(info.color, "blue");

        let info = ranking_info("10 states with the lowest unemployment in green").unwrap();
        assert_eq!(info.count, 10);
        assert_eq!(info.direction, RankDirection::Ascending);
        assert_eq!(info.color, "green");
    }

    #[test]
    fn comparison_takes_first_two_distinct_metrics() {
        let (first, second, operator) =
            comparison_info("states where unemployment is higher than crime rates").unwrap();
        assert_eq!(first, DataType::Unemployment);
        assert_eq!(second, DataType::CrimeRates);
        assert_eq!(operator, ComparisonOperator::Gt);
    }

    #[test]
    fn comparison_requires_two_distinct_metrics() {
        assert!(comparison_info("income higher than income").is_none());
        assert!(comparison_info("population higher than 10").is_none());
    }

    #[test]
    fn multi_conditional_and() {
        let (clauses, operator) =
            multi_conditional("income is above 60000 and crime rates are below 0.1").unwrap();
        assert_eq!(operator, LogicOperator::And);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|clause| !clause.exclude));
    }

    #[test]
    fn multi_conditional_first_keyword_wins() {
        let (_, operator) =
            multi_conditional("low crime or high income and low unemployment").unwrap();
        assert_eq!(operator, LogicOperator::Or);
    }

    #[test]
    fn multi_conditional_not_logic() {
        let (clauses, operator) =
            multi_conditional("high income but not high crime").unwrap();
        assert_eq!(operator, LogicOperator::And);
        assert_eq!(clauses.len(), 2);
        assert!(!clauses[0].exclude);
        assert!(clauses[1].exclude);
    }

    #[test]
    fn multi_conditional_rejects_unparsable_clause() {
        assert!(multi_conditional("high income and beautiful sunsets").is_none());
    }

    #[test]
    fn parses_ranking_percentage() {
        let condition = ranking_percentage_condition("top 10% for income").unwrap();
        assert_eq!(
            condition,
            Condition::Ranking {
                data_type: DataType::Income,
                direction: RankDirection::Descending,
                percentage: 10.0,
            }
        );
    }

    #[test]
    fn parses_correlation_comparison() {
        let condition = correlation_comparison_condition(
            "correlation between income and crime is stronger than correlation between population and unemployment",
        )
        .unwrap();
        let Condition::CorrelationComparison {
            first,
            second,
            operator,
        } = condition
        else {
            panic!("expected correlation comparison");
        };
        assert_eq!(first.data_type_a, DataType::Income);
        assert_eq!(first.data_type_b, DataType::CrimeRates);
        assert_eq!(second.data_type_a, DataType::Population);
        assert_eq!(second.data_type_b, DataType::Unemployment);
        assert_eq!(operator, ComparisonOperator::Gt);
    }

    #[test]
    fn parses_range_condition() {
        let condition =
            range_condition("population between 2 million and 5 million").unwrap();
        assert_eq!(
            condition,
            Condition::Range {
                data_type: DataType::Population,
                min_value: 2_000_000.0,
                max_value: 5_000_000.0,
            }
        );
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(range_condition("income between 90000 and 50000").is_none());
    }

    #[test]
    fn parses_statistical_condition() {
        let condition = statistical_condition("average income is above 60000").unwrap();
        assert_eq!(
            condition,
            Condition::Statistical {
                function_name: "mean".to_string(),
                data_type: DataType::Income,
                operator: ComparisonOperator::Gt,
                threshold: 60_000.0,
            }
        );
    }

    #[test]
    fn advanced_conditions_priority() {
        // Ranking percentage wins even when "and" is present.
        let (conditions, _) =
            advanced_conditions("top 10% for income and population").unwrap();
        assert!(matches!(conditions[0], Condition::Ranking { .. }));

        let (conditions, operator) = advanced_conditions(
            "average income above 60000 and average crime below 0.1",
        )
        .unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(operator, LogicOperator::And);
        assert!(matches!(conditions[0], Condition::Statistical { .. }));
    }
}
