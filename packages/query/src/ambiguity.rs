//! Ambiguity classifier: under-specified commands get a clarification
//! instead of a guess.
//!
//! Runs early in the dispatch cascade, after the analytical branches but
//! before any concrete parser, so that bare qualifiers ("good states")
//! always come back as [`Intent::Clarify`] rather than `Unknown`.

use map_data_query_models::{ClarifyCategory, Intent};

use crate::normalize;

/// Qualitative words that say nothing measurable on their own.
const VAGUE_WORDS: &[&str] = &[
    "good", "bad", "nice", "great", "terrible", "awful", "best-looking", "pretty", "ugly",
    "interesting", "boring",
];

const HIGH_LOW_WORDS: &[&str] = &["high", "low", "higher", "lower"];

const RANKING_WORDS: &[&str] = &[
    "top", "bottom", "highest", "lowest", "best", "worst", "most", "least", "maximum", "minimum",
];

/// Action words that mark a command as purposeful even when very short,
/// keeping things like "clear highlights" out of the general-ambiguous
/// bucket.
const ACTION_WORDS: &[&str] = &[
    "clear", "reset", "remove", "highlight", "show", "display", "find", "heatmap", "compare",
];

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '-')
        .any(|token| token == word)
}

fn has_any_word(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| has_word(text, word))
}

/// Classifies an under-specified command, or returns `None` when the
/// command carries enough signal for the concrete parsers.
#[must_use]
pub fn classify(text: &str) -> Option<Intent> {
    let data_type = normalize::data_type(text);
    let has_number = normalize::number_expression(text).is_some();

    if has_word(text, "help") || text.contains("what can") || text.contains("how do") {
        return Some(clarify(ClarifyCategory::HelpRequest));
    }

    if (has_word(text, "compare") || text.contains("compared") || text.contains(" vs "))
        && normalize::find_data_types(text).len() < 2
    {
        return Some(clarify(ClarifyCategory::ComparisonRequest));
    }

    if has_any_word(text, RANKING_WORDS) && data_type.is_none() {
        return Some(clarify(ClarifyCategory::IncompleteRanking));
    }

    if has_any_word(text, HIGH_LOW_WORDS) && data_type.is_none() && !has_number {
        return Some(clarify(ClarifyCategory::MissingDataType));
    }

    if has_any_word(text, VAGUE_WORDS) && data_type.is_none() && !has_number {
        return Some(clarify(ClarifyCategory::VagueQualitative));
    }

    if text.split_whitespace().count() <= 2
        && data_type.is_none()
        && normalize::color(text).is_none()
        && !has_any_word(text, ACTION_WORDS)
        && !normalize::has_trend_keyword(text)
    {
        return Some(clarify(ClarifyCategory::GeneralAmbiguous));
    }

    None
}

/// Builds the fixed clarification for a category.
#[must_use]
pub fn clarify(category: ClarifyCategory) -> Intent {
    let (message, suggestions): (&str, &[&str]) = match category {
        ClarifyCategory::VagueQualitative => (
            "\"Good\" or \"bad\" can mean different things. Which metric did you have in mind?",
            &[
                "show states with low crime rates",
                "show states with income above 60000",
                "show states with low unemployment",
                "show states with high population",
            ],
        ),
        ClarifyCategory::MissingDataType => (
            "High or low what? Name a metric to filter by.",
            &[
                "show states with high income",
                "show states with low crime rates",
                "show counties with high population",
                "show states with low unemployment",
            ],
        ),
        ClarifyCategory::IncompleteRanking => (
            "Top or bottom by which metric?",
            &[
                "show top 5 states by income",
                "show top 10 states by population",
                "show bottom 5 states by unemployment",
                "show top 3 counties by land area",
            ],
        ),
        ClarifyCategory::ComparisonRequest => (
            "Comparing needs two metrics. Which pair should I compare?",
            &[
                "show states where income is higher than unemployment",
                "show states where crime rates are lower than unemployment",
                "show counties where population is higher than land area",
                "compare income and crime rates",
            ],
        ),
        ClarifyCategory::HelpRequest => (
            "I understand commands about population, crime rates, income, unemployment, and land area.",
            &[
                "show states with population over 10 million",
                "highlight california in red",
                "show top 5 states by income in blue",
                "show a heatmap of crime rates",
                "clear highlights",
            ],
        ),
        ClarifyCategory::GeneralAmbiguous => (
            "I couldn't find a metric or an action in that. Try one of these:",
            &[
                "show states with high income",
                "show top 5 states by population",
                "highlight texas in blue",
                "show a heatmap of unemployment",
            ],
        ),
    };

    Intent::Clarify {
        category,
        message: message.to_string(),
        suggestions: suggestions.iter().map(ToString::to_string).collect(),
    }
}
