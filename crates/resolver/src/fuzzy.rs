//! Fuzzy title scoring on a 0-100 scale.
//!
//! Queries are free text typed by a user, so plain edit distance is not
//! enough: "dark knight" should find "The Dark Knight" and a swapped-letter
//! typo should still clear the match threshold. The score here is the best
//! of three views of the pair, all computed over preprocessed strings.
//!
//! ## Algorithm
//!
//! 1. Preprocess both strings: lowercase, replace non-alphanumeric
//!    characters with spaces, collapse whitespace runs.
//! 2. Compute three sub-scores:
//!    - plain ratio: normalized Damerau-Levenshtein similarity x 100
//!    - token-sort ratio: plain ratio over alphabetically sorted tokens
//!    - token-set ratio: plain ratio over intersection/difference token
//!      groups, so a query that is a subset of a title scores 100
//! 3. The final score is the maximum of the three.

use strsim::normalized_damerau_levenshtein;

use std::collections::BTreeSet;

/// Scores at or below this value are treated as no match
pub const MATCH_THRESHOLD: f64 = 85.0;

/// Best-scoring candidate for a query
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Position of the candidate in the scanned sequence
    pub position: usize,
    /// Similarity score in `[0, 100]`
    pub score: f64,
}

/// Similarity between a query and a candidate title in `[0, 100]`.
///
/// Case and punctuation insensitive. An input that is empty after
/// preprocessing scores 0 against everything.
pub fn score(query: &str, title: &str) -> f64 {
    score_processed(&preprocess(query), &preprocess(title))
}

/// Scan candidates and return the best-scoring one, or `None` when nothing
/// scores strictly above [`MATCH_THRESHOLD`]. Ties keep the earliest
/// position.
pub fn best_match<'a, I>(query: &str, titles: I) -> Option<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = preprocess(query);
    if query.is_empty() {
        return None;
    }

    let mut best: Option<FuzzyMatch> = None;
    for (position, title) in titles.into_iter().enumerate() {
        let candidate = score_processed(&query, &preprocess(title));
        let improved = match &best {
            Some(current) => candidate > current.score,
            None => true,
        };
        if improved {
            best = Some(FuzzyMatch {
                position,
                score: candidate,
            });
        }
    }

    best.filter(|found| found.score > MATCH_THRESHOLD)
}

/// Lowercase, map non-alphanumeric characters to spaces, collapse runs
fn preprocess(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn score_processed(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    ratio(a, b)
        .max(token_sort_ratio(a, b))
        .max(token_set_ratio(a, b))
}

/// Normalized Damerau-Levenshtein similarity scaled to `[0, 100]`.
/// Damerau so that adjacent-letter transposition typos count as one edit.
fn ratio(a: &str, b: &str) -> f64 {
    normalized_damerau_levenshtein(a, b) * 100.0
}

/// Ratio over alphabetically sorted tokens; word order stops mattering
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Ratio over token groups built from the set intersection and the
/// per-side leftovers. When one side's tokens are a subset of the other's,
/// the intersection string equals one comparand and the score is 100.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let shared = join_tokens(tokens_a.intersection(&tokens_b).copied());
    let only_a = join_tokens(tokens_a.difference(&tokens_b).copied());
    let only_b = join_tokens(tokens_b.difference(&tokens_a).copied());

    let combined_a = join_parts(&shared, &only_a);
    let combined_b = join_parts(&shared, &only_b);

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn sorted_tokens(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn join_tokens<'a, I>(tokens: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    tokens.collect::<Vec<_>>().join(" ")
}

fn join_parts(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{} {}", base, rest),
    }
}

// ============================================================================
// Tests
// ============================================================================
