//! The intent dispatcher: an ordered cascade of (predicate, parser) pairs.
//!
//! The cascade order is semantically load-bearing — earlier branches
//! shadow later, more general ones — so it is declared as one visible
//! [`BRANCHES`] slice instead of nested conditionals. A branch whose
//! predicate matches but whose parser returns `None` falls through to the
//! next branch rather than producing a partial result; the final fallback
//! is [`Intent::Unknown`] with fixed example suggestions.
//!
//! The three "legacy" template branches near the bottom predate the
//! general multi-conditional/trend branches and are kept reachable as
//! strict-template fallbacks for phrasings the loose parsers reject.

use std::sync::LazyLock;

use map_data_geography_models::fips;
use map_data_query_models::{ColoredCondition, FilterClause, Intent, LogicOperator};
use regex::Regex;

use crate::ambiguity;
use crate::conditions;
use crate::normalize;
use crate::registry;

/// One step of the cascade.
pub struct Branch {
    /// Stable identifier, used in logs and order tests.
    pub name: &'static str,
    /// Cheap structural check; deciding whether the parser should run.
    pub applies: fn(&str) -> bool,
    /// Full parse; `None` falls through to the next branch.
    pub parse: fn(&str) -> Option<Intent>,
}

/// The dispatch cascade, highest priority first.
pub static BRANCHES: &[Branch] = &[
    Branch {
        name: "advanced_analytical",
        applies: applies_advanced_analytical,
        parse: parse_advanced_analytical,
    },
    Branch {
        name: "analytical_filter",
        applies: applies_analytical_filter,
        parse: parse_analytical_filter,
    },
    Branch {
        name: "ambiguous",
        applies: |text| ambiguity::classify(text).is_some(),
        parse: ambiguity::classify,
    },
    Branch {
        name: "bare_analytical",
        applies: |text| registry::find_function_mention(text).is_some(),
        parse: parse_bare_analytical,
    },
    Branch {
        name: "simple_highlight",
        applies: |text| SIMPLE_HIGHLIGHT_RE.is_match(text),
        parse: parse_simple_highlight,
    },
    Branch {
        name: "multi_color_highlight",
        applies: |text| normalize::colors(text).len() >= 2 && text.contains(" and "),
        parse: parse_multi_color_highlight,
    },
    Branch {
        name: "ranking",
        applies: |text| conditions::ranking_info(text).is_some(),
        parse: parse_ranking,
    },
    Branch {
        name: "comparison",
        applies: applies_comparison,
        parse: parse_comparison,
    },
    Branch {
        name: "multi_conditional",
        applies: applies_multi_conditional,
        parse: parse_multi_conditional,
    },
    Branch {
        name: "legacy_literals",
        applies: |text| text == "highlight california red" || text == "highlight texas blue",
        parse: parse_legacy_literal,
    },
    Branch {
        name: "clear_highlights",
        applies: applies_clear,
        parse: |_| Some(Intent::ClearHighlights),
    },
    Branch {
        name: "trend_filter",
        applies: normalize::has_trend_keyword,
        parse: parse_trend_filter,
    },
    Branch {
        name: "legacy_multi_condition",
        applies: |text| LEGACY_MULTI_RE.is_match(text),
        parse: parse_legacy_multi_condition,
    },
    Branch {
        name: "legacy_trend",
        applies: |text| LEGACY_WHERE_RE.is_match(text),
        parse: parse_legacy_trend,
    },
    Branch {
        name: "legacy_filter",
        applies: |text| LEGACY_FILTER_RE.is_match(text),
        parse: parse_legacy_filter,
    },
    Branch {
        name: "heatmap",
        applies: applies_heatmap,
        parse: parse_heatmap,
    },
];

/// Interprets a free-text command into an [`Intent`].
///
/// Never fails: input that matches no branch produces [`Intent::Unknown`]
/// with example suggestions.
#[must_use]
pub fn interpret(command: &str) -> Intent {
    let text = command.trim().to_lowercase();
    if text.is_empty() {
        return Intent::Unknown {
            suggestions: default_suggestions(),
        };
    }

    for branch in BRANCHES {
        if (branch.applies)(&text) {
            if let Some(intent) = (branch.parse)(&text) {
                log::debug!("command matched branch '{}'", branch.name);
                return intent;
            }
            log::trace!("branch '{}' matched but failed to parse", branch.name);
        }
    }

    Intent::Unknown {
        suggestions: default_suggestions(),
    }
}

/// The fixed example suggestions attached to `Unknown` intents.
#[must_use]
pub fn default_suggestions() -> Vec<String> {
    [
        "show states with population over 10 million",
        "highlight california in red",
        "show top 5 states by income in blue",
        "show a heatmap of crime rates",
        "clear highlights",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

// ── Regexes shared by branches ───────────────────────────────────────────

static SIMPLE_HIGHLIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:highlight|show|display)\s+(.+?)\s+in\s+([a-z]+)$").expect("valid regex")
});

static LEGACY_MULTI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:show|highlight|find|display)\s+(?:me\s+)?(?:all\s+)?(?:states|counties)\s+where\s+(.+?)\s+and\s+(.+)$",
    )
    .expect("valid regex")
});

static LEGACY_WHERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:show|highlight|find|display)\s+(?:me\s+)?(?:all\s+)?(?:states|counties)\s+where\s+(.+)$",
    )
    .expect("valid regex")
});

static LEGACY_FILTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:show|highlight|find|display)\s+(?:me\s+)?(?:all\s+)?(?:states|counties)\s+(?:with|where|whose|having|that have)\s+(.+)$",
    )
    .expect("valid regex")
});

// ── Branch predicates ────────────────────────────────────────────────────

fn applies_advanced_analytical(text: &str) -> bool {
    normalize::contains_any(text, &["stronger than", "weaker than", "difference between"])
        || conditions::ranking_percentage_condition(text).is_some()
        || conditions::range_condition(text).is_some()
        || (registry::find_function_mention(text).is_some()
            && (text.contains(" and ") || text.contains(" or ")))
}

fn applies_analytical_filter(text: &str) -> bool {
    registry::find_function_mention(text).is_some()
        && normalize::operator(text).is_some()
        && normalize::number_expression(text).is_some()
}

fn applies_comparison(text: &str) -> bool {
    normalize::contains_any(
        text,
        &[
            "higher than",
            "lower than",
            "greater than",
            "less than",
            "smaller than",
            "larger than",
            " vs ",
            "versus",
            "compare",
        ],
    )
}

fn applies_multi_conditional(text: &str) -> bool {
    text.contains(" and ")
        || text.contains(" or ")
        || conditions::NOT_SEPARATORS
            .iter()
            .any(|separator| text.contains(separator))
}

fn applies_clear(text: &str) -> bool {
    normalize::contains_any(
        text,
        &["clear", "reset", "remove highlight", "remove all highlight", "unhighlight"],
    )
}

fn applies_heatmap(text: &str) -> bool {
    normalize::contains_any(text, &["heatmap", "heat map", "choropleth", "shade"])
}

// ── Branch parsers ───────────────────────────────────────────────────────

fn parse_advanced_analytical(text: &str) -> Option<Intent> {
    let (conditions, logic) = conditions::advanced_conditions(text)?;
    Some(Intent::AdvancedAnalyticalFilter {
        conditions,
        logic,
        color: normalize::color(text).unwrap_or("yellow").to_string(),
        target: normalize::target_kind(text),
    })
}

fn parse_analytical_filter(text: &str) -> Option<Intent> {
    let descriptor = registry::find_function_mention(text)?;
    let data_types = normalize::find_data_types(text);
    if data_types.is_empty() {
        return None;
    }
    let operator = normalize::operator(text)?;
    let end = normalize::operator_end(text)?;
    let threshold = normalize::number_expression(&text[end..])?;

    Some(Intent::AnalyticalFilter {
        function_name: descriptor.name.clone(),
        data_types,
        operator,
        threshold,
        color: normalize::color(text).unwrap_or("yellow").to_string(),
        target: normalize::target_kind(text),
    })
}

fn parse_bare_analytical(text: &str) -> Option<Intent> {
    use map_data_query_models::{FunctionInput, InputArity};

    let descriptor = registry::find_function_mention(text)?;
    let found = normalize::find_data_types(text);

    let input = match descriptor.input_arity {
        InputArity::Single => FunctionInput::Single {
            data_type: *found.first()?,
        },
        InputArity::Dual => {
            if found.len() < 2 {
                return None;
            }
            FunctionInput::Dual {
                data_type_x: found[0],
                data_type_y: found[1],
            }
        }
    };

    Some(Intent::AnalyticalFunction {
        function_name: descriptor.name.clone(),
        input,
    })
}

fn parse_simple_highlight(text: &str) -> Option<Intent> {
    let captures = SIMPLE_HIGHLIGHT_RE.captures(text)?;
    let color = normalize::color(&captures[2])?;

    let locations: Vec<String> = captures[1]
        .split(',')
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| fips::name_to_fips(part).map(ToString::to_string))
        .collect::<Option<Vec<_>>>()?;

    if locations.is_empty() {
        return None;
    }

    let is_multiple = locations.len() > 1;
    Some(Intent::SimpleHighlight {
        target: map_data_geography_models::RegionKind::State,
        locations,
        color: color.to_string(),
        is_multiple,
    })
}

fn parse_multi_color_highlight(text: &str) -> Option<Intent> {
    let colored_conditions: Vec<ColoredCondition> = text
        .split(" and ")
        .map(|part| {
            let color = normalize::color(part)?;
            let condition = conditions::single_condition(part)?;
            Some(ColoredCondition {
                condition,
                color: color.to_string(),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    if colored_conditions.len() < 2 {
        return None;
    }

    Some(Intent::MultiColorHighlight {
        target: normalize::target_kind(text),
        colored_conditions,
    })
}

fn parse_ranking(text: &str) -> Option<Intent> {
    let info = conditions::ranking_info(text)?;
    Some(Intent::Ranking {
        target: normalize::target_kind(text),
        data_type: info.data_type,
        count: info.count,
        direction: info.direction,
        color: info.color,
    })
}

fn parse_comparison(text: &str) -> Option<Intent> {
    let (first_metric, second_metric, operator) = conditions::comparison_info(text)?;
    Some(Intent::Comparison {
        target: normalize::target_kind(text),
        first_metric,
        second_metric,
        operator,
    })
}

fn parse_multi_conditional(text: &str) -> Option<Intent> {
    let (clauses, operator) = conditions::multi_conditional(text)?;
    Some(Intent::MultiFilter {
        target: normalize::target_kind(text),
        clauses,
        operator,
    })
}

fn parse_legacy_literal(text: &str) -> Option<Intent> {
    match text {
        "highlight california red" => Some(Intent::HighlightRegion {
            region_code: "06".to_string(),
            color: "red".to_string(),
        }),
        "highlight texas blue" => Some(Intent::HighlightRegion {
            region_code: "48".to_string(),
            color: "blue".to_string(),
        }),
        _ => None,
    }
}

fn parse_trend_filter(text: &str) -> Option<Intent> {
    let condition = conditions::trend_condition(text)?;
    let data_type = condition.data_type()?;
    Some(Intent::Filter {
        target: normalize::target_kind(text),
        data_type,
        condition,
    })
}

fn parse_legacy_multi_condition(text: &str) -> Option<Intent> {
    let captures = LEGACY_MULTI_RE.captures(text)?;
    let clauses = vec![
        FilterClause::include(conditions::single_condition(&captures[1])?),
        FilterClause::include(conditions::single_condition(&captures[2])?),
    ];
    Some(Intent::MultiFilter {
        target: normalize::target_kind(text),
        clauses,
        operator: LogicOperator::And,
    })
}

fn parse_legacy_trend(text: &str) -> Option<Intent> {
    let captures = LEGACY_WHERE_RE.captures(text)?;
    let condition = conditions::trend_condition(&captures[1])?;
    let data_type = condition.data_type()?;
    Some(Intent::Filter {
        target: normalize::target_kind(text),
        data_type,
        condition,
    })
}

fn parse_legacy_filter(text: &str) -> Option<Intent> {
    let captures = LEGACY_FILTER_RE.captures(text)?;
    let condition = conditions::value_condition(&captures[1])?;
    let data_type = condition.data_type()?;
    Some(Intent::Filter {
        target: normalize::target_kind(text),
        data_type,
        condition,
    })
}

fn parse_heatmap(text: &str) -> Option<Intent> {
    let data_type = normalize::data_type(text)?;
    Some(Intent::Heatmap {
        target: normalize::target_kind(text),
        data_type,
        color_scheme: normalize::color(text).unwrap_or("red").to_string(),
    })
}
