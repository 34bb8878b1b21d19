//! Analytical function registry — loaded from the embedded TOML catalog.
//!
//! `functions.toml` is baked into the binary at compile time via
//! [`include_str!`]. Adding a function is as simple as adding a new
//! `[[function]]` entry there.

use std::sync::LazyLock;

use map_data_query_models::FunctionDescriptor;
use serde::Deserialize;

/// The catalog embedded at compile time.
const FUNCTIONS_TOML: &str = include_str!("../functions.toml");

/// Number of cataloged functions (used in tests).
#[cfg(test)]
const EXPECTED_FUNCTION_COUNT: usize = 11;

#[derive(Deserialize)]
struct RegistryFile {
    function: Vec<FunctionDescriptor>,
}

static REGISTRY: LazyLock<Vec<FunctionDescriptor>> = LazyLock::new(|| {
    let file: RegistryFile = toml::from_str(FUNCTIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse functions.toml: {e}"));
    file.function
});

/// Returns every cataloged function, in registry order.
#[must_use]
pub fn all_functions() -> &'static [FunctionDescriptor] {
    &REGISTRY
}

/// Resolves an exact function name or alias, case-insensitively.
#[must_use]
pub fn function_by_name(query: &str) -> Option<&'static FunctionDescriptor> {
    let lower = query.trim().to_lowercase();
    all_functions().iter().find(|descriptor| {
        descriptor.name == lower || descriptor.aliases.iter().any(|alias| *alias == lower)
    })
}

/// Finds the first cataloged function mentioned anywhere in a command.
///
/// Single-word names and aliases must appear as whole words (so "sum"
/// does not fire inside "summer"); multi-word aliases match as
/// substrings.
#[must_use]
pub fn find_function_mention(text: &str) -> Option<&'static FunctionDescriptor> {
    all_functions().iter().find(|descriptor| {
        mentioned(text, &descriptor.name)
            || descriptor.aliases.iter().any(|alias| mentioned(text, alias))
    })
}

fn mentioned(text: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        text.contains(keyword)
    } else {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .any(|token| token == keyword)
    }
}

/// A search hit with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMatch {
    /// The matching descriptor.
    pub descriptor: &'static FunctionDescriptor,
    /// Relevance: exact name 10, exact alias 8, name contains query 6,
    /// any other field contains query 4.
    pub score: u32,
}

/// Scores every cataloged function against a query and returns matches
/// sorted by descending score, ties in registry order.
#[must_use]
pub fn search_functions(query: &str) -> Vec<FunctionMatch> {
    let lower = query.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<FunctionMatch> = all_functions()
        .iter()
        .filter_map(|descriptor| {
            let score = if descriptor.name == lower {
                10
            } else if descriptor.aliases.iter().any(|alias| *alias == lower) {
                8
            } else if descriptor.name.contains(&lower) {
                6
            } else if descriptor.aliases.iter().any(|alias| alias.contains(&lower))
                || descriptor.description.to_lowercase().contains(&lower)
            {
                4
            } else {
                return None;
            };
            Some(FunctionMatch { descriptor, score })
        })
        .collect();

    // Stable sort keeps registry order within equal scores.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_data_query_models::InputArity;

    #[test]
    fn loads_all_functions() {
        assert_eq!(all_functions().len(), EXPECTED_FUNCTION_COUNT);
    }

    #[test]
    fn function_names_are_unique() {
        let mut names: Vec<&str> = all_functions()
            .iter()
            .map(|descriptor| descriptor.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EXPECTED_FUNCTION_COUNT);
    }

    #[test]
    fn only_correlation_is_dual() {
        for descriptor in all_functions() {
            let expected = if descriptor.name == "correlation" {
                InputArity::Dual
            } else {
                InputArity::Single
            };
            assert_eq!(descriptor.input_arity, expected, "{}", descriptor.name);
        }
    }

    #[test]
    fn resolves_names_and_aliases() {
        assert_eq!(function_by_name("mean").unwrap().name, "mean");
        assert_eq!(function_by_name("AVERAGE").unwrap().name, "mean");
        assert_eq!(function_by_name("std dev").unwrap().name, "standard_deviation");
        assert!(function_by_name("mode").is_none());
    }

    #[test]
    fn finds_mentions_as_whole_words() {
        assert_eq!(
            find_function_mention("what is the average income").unwrap().name,
            "mean"
        );
        assert_eq!(
            find_function_mention("standard deviation of crime").unwrap().name,
            "standard_deviation"
        );
        // "sum" must not fire inside "summer".
        assert!(find_function_mention("summer temperatures").is_none());
    }

    #[test]
    fn search_scores_and_orders() {
        let matches = search_functions("mean");
        assert_eq!(matches[0].descriptor.name, "mean");
        assert_eq!(matches[0].score, 10);

        let matches = search_functions("avg");
        assert_eq!(matches[0].descriptor.name, "mean");
        assert_eq!(matches[0].score, 8);

        let matches = search_functions("quart");
        assert_eq!(matches[0].descriptor.name, "quartiles");
        assert_eq!(matches[0].score, 6);

        // "values" appears only in descriptions.
        let matches = search_functions("values");
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.score == 4));
    }

    #[test]
    fn search_ties_keep_registry_order() {
        // "the values" appears in several descriptions; ties must follow
        // registry order (mean first).
        let matches = search_functions("the values");
        let names: Vec<&str> = matches.iter().map(|m| m.descriptor.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|name| {
            all_functions()
                .iter()
                .position(|d| d.name == *name)
                .unwrap()
        });
        assert_eq!(names, sorted);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(search_functions("").is_empty());
        assert!(search_functions("   ").is_empty());
    }
}
