//! Query resolution: fuzzy title matching plus neighbor lookup.
//!
//! A [`TitleResolver`] borrows a built [`SimilarityEngine`] and answers
//! free-text queries against it. Resolution is a thin read path: match the
//! query to a catalog row, read that row of the precomputed similarity
//! matrix, rank, truncate.

use crate::fuzzy::{self, FuzzyMatch};

use engine::SimilarityEngine;
use tracing::debug;

/// Number of recommendations returned when the caller does not ask for a
/// specific count
pub const DEFAULT_NEIGHBORS: usize = 5;

/// A recommended title with its cosine similarity to the query movie
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f32,
}

/// Read-only query interface over a similarity engine.
///
/// Resolvers are cheap to construct; build one per query batch or keep one
/// alive alongside the engine.
pub struct TitleResolver<'a> {
    engine: &'a SimilarityEngine,
}

impl<'a> TitleResolver<'a> {
    pub fn new(engine: &'a SimilarityEngine) -> Self {
        Self { engine }
    }

    /// Resolve a free-text query to up to `k` recommended titles, most
    /// similar first. An empty result means no catalog title scored above
    /// the fuzzy-match threshold.
    pub fn resolve(&self, query_title: &str, k: usize) -> Vec<String> {
        self.recommend(query_title, k)
            .into_iter()
            .map(|rec| rec.title)
            .collect()
    }

    /// Like [`resolve`](Self::resolve), but keeps each neighbor's
    /// similarity score.
    pub fn recommend(&self, query_title: &str, k: usize) -> Vec<Recommendation> {
        let Some(matched) = self.closest_match(query_title) else {
            return Vec::new();
        };

        debug!(
            "Matched {:?} to {:?} (score {:.1})",
            query_title,
            self.engine.title_at(matched.position).unwrap_or("?"),
            matched.score
        );

        self.neighbors(matched.position, k)
    }

    /// Best fuzzy match for a query, if any catalog title clears the
    /// threshold. Ties resolve to the lowest catalog position.
    pub fn closest_match(&self, query_title: &str) -> Option<FuzzyMatch> {
        let found = fuzzy::best_match(
            query_title,
            self.engine.titles().iter().map(|title| title.as_str()),
        );
        if found.is_none() {
            debug!(
                "No catalog title matched {:?} above {}",
                query_title,
                fuzzy::MATCH_THRESHOLD
            );
        }
        found
    }

    /// Top `k` neighbors of a catalog row, excluding the row itself.
    /// Equal scores rank the lower catalog position first.
    ///
    /// Callers that already hold a match from
    /// [`closest_match`](Self::closest_match) use this directly instead of
    /// rescanning titles through [`recommend`](Self::recommend).
    pub fn neighbors(&self, position: usize, k: usize) -> Vec<Recommendation> {
        let row = self.engine.similarities_for(position);

        let mut candidates: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != position)
            .collect();
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        candidates.truncate(k);

        candidates
            .into_iter()
            .filter_map(|(other, score)| {
                self.engine.title_at(other).map(|title| Recommendation {
                    title: title.to_string(),
                    score,
                })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use dataset::{MovieCorpus, MovieRecord};
    use engine::SimilarityEngine;

    fn record(id: u32, title: &str, tags: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            tags: tags.to_string(),
        }
    }

    fn create_test_engine() -> SimilarityEngine {
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Space One", "space ship alien crew mission"),
            record(2, "Space Two", "space ship alien rescue mission"),
            record(3, "Romance One", "love letters summer romance beach"),
            record(4, "Romance Two", "love letters winter romance city"),
            record(5, "Heist One", "bank robbery crew getaway"),
            record(6, "Heist Two", "bank robbery tunnel getaway"),
        ]);
        SimilarityEngine::build(&corpus)
    }

    #[test]
    fn test_resolve_excludes_the_matched_title() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Space One", 5);

        assert_eq!(results.len(), 5); // every other movie, capped by k
        assert!(!results.contains(&"Space One".to_string()));
    }

    #[test]
    fn test_resolve_ranks_most_similar_first() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Space One", 3);

        // Shares four of five tags with the query movie
        assert_eq!(results[0], "Space Two");
    }

    #[test]
    fn test_recommend_scores_descend() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let results = resolver.recommend("Heist One", 5);

        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_recommend_scores_match_engine_row() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let results = resolver.recommend("Space One", 2);

        for rec in &results {
            let position = engine.position_of(&rec.title).unwrap();
            assert_eq!(rec.score, engine.similarity(0, position));
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let first = resolver.recommend("Romance Two", 5);
        let second = resolver.recommend("Romance Two", 5);

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_fuzzy_query() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        // Lowercase with a transposition typo
        let results = resolver.resolve("space oen", 2);

        assert_eq!(results[0], "Space Two");
    }

    #[test]
    fn test_resolve_unmatched_query_is_empty() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        assert!(resolver.resolve("wholly unrelated movie", 5).is_empty());
        assert!(resolver.resolve("", 5).is_empty());
    }

    #[test]
    fn test_resolve_k_zero_is_empty() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        assert!(resolver.resolve("Space One", 0).is_empty());
    }

    #[test]
    fn test_resolve_k_beyond_corpus_returns_all_others() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Space One", 50);

        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_tie_break_prefers_lower_position() {
        // Two candidates with byte-identical tag documents tie exactly
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Query", "alpha beta gamma"),
            record(2, "First Twin", "alpha beta delta"),
            record(3, "Second Twin", "alpha beta delta"),
        ]);
        let engine = SimilarityEngine::build(&corpus);
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Query", 2);

        assert_eq!(results, vec!["First Twin".to_string(), "Second Twin".to_string()]);
    }

    #[test]
    fn test_zero_similarity_row_still_returns_neighbors() {
        // Every tag is a stop word, so the movie's feature vector is all
        // zeros and its row holds no positive similarity. There is no
        // "no similarity" sentinel: the least-dissimilar titles come back,
        // ordered by position.
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Stopworded", "the and of with"),
            record(2, "First", "alpha beta"),
            record(3, "Second", "gamma delta"),
        ]);
        let engine = SimilarityEngine::build(&corpus);
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Stopworded", 2);

        assert_eq!(results, vec!["First".to_string(), "Second".to_string()]);
    }

    #[test]
    fn test_self_exclusion_is_positional_for_duplicate_titles() {
        // Only the matched row is excluded; a second row that happens to
        // share the title text is still a valid neighbor
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Twin", "alpha beta gamma"),
            record(2, "Twin", "alpha beta gamma"),
            record(3, "Other", "delta epsilon zeta"),
        ]);
        let engine = SimilarityEngine::build(&corpus);
        let resolver = TitleResolver::new(&engine);

        let results = resolver.resolve("Twin", 1);

        assert_eq!(results, vec!["Twin".to_string()]);
    }

    #[test]
    fn test_closest_match_reports_position_and_score() {
        let engine = create_test_engine();
        let resolver = TitleResolver::new(&engine);

        let found = resolver.closest_match("heist one").unwrap();

        assert_eq!(engine.title_at(found.position), Some("Heist One"));
        assert_eq!(found.score, 100.0);
    }
}
