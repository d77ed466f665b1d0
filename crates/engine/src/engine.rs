//! The similarity engine: fitted vectorizer, aligned feature vectors, and
//! the precomputed all-pairs similarity matrix behind one immutable object.
//!
//! Built once via [`SimilarityEngineBuilder`] and passed by reference to
//! query-side code; nothing mutates it after construction.

use crate::similarity::SimilarityMatrix;
use crate::vectorizer::TfidfVectorizer;
use dataset::MovieCorpus;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Configures and builds a [`SimilarityEngine`]
#[derive(Debug, Clone)]
pub struct SimilarityEngineBuilder {
    max_features: usize,
}

impl SimilarityEngineBuilder {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Configure the vocabulary cap (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Build the engine from a prepared corpus.
    ///
    /// Steps:
    /// 1. Fit the TF-IDF vectorizer over all tag documents
    /// 2. Vectorize every document, aligned with corpus order
    /// 3. Compute the all-pairs similarity matrix
    /// 4. Index titles by first occurrence
    #[instrument(skip_all, fields(movies = corpus.len()))]
    pub fn build(self, corpus: &MovieCorpus) -> SimilarityEngine {
        let started = Instant::now();

        let documents = corpus.records().iter().map(|r| r.tags.as_str());
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(documents, self.max_features);
        debug!(
            "Vectorized {} documents into {} features in {:?}",
            vectors.len(),
            vectorizer.vocabulary_len(),
            started.elapsed()
        );

        let matrix_started = Instant::now();
        let matrix = SimilarityMatrix::from_vectors(&vectors);
        debug!(
            "Computed {}x{} similarity matrix in {:?}",
            matrix.dim(),
            matrix.dim(),
            matrix_started.elapsed()
        );

        // Title lookups resolve to the first occurrence; a collision is a
        // data-quality warning, records stay keyed by position internally
        let mut titles = Vec::with_capacity(corpus.len());
        let mut title_index: HashMap<String, usize> = HashMap::new();
        for (position, record) in corpus.records().iter().enumerate() {
            if title_index.contains_key(&record.title) {
                warn!(
                    "Duplicate title {:?} in corpus; lookups resolve to the first occurrence",
                    record.title
                );
            } else {
                title_index.insert(record.title.clone(), position);
            }
            titles.push(record.title.clone());
        }

        info!(
            "Similarity engine ready: {} movies, {} features, built in {:?}",
            titles.len(),
            vectorizer.vocabulary_len(),
            started.elapsed()
        );

        SimilarityEngine {
            titles,
            title_index,
            vectorizer,
            vectors,
            matrix,
        }
    }
}

impl Default for SimilarityEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable engine over a static corpus: titles, feature vectors, and the
/// similarity matrix, all aligned by corpus position.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    titles: Vec<String>,
    title_index: HashMap<String, usize>,
    vectorizer: TfidfVectorizer,
    vectors: Vec<Vec<f32>>,
    matrix: SimilarityMatrix,
}

impl SimilarityEngine {
    pub fn builder() -> SimilarityEngineBuilder {
        SimilarityEngineBuilder::new()
    }

    /// Build with the default configuration
    pub fn build(corpus: &MovieCorpus) -> Self {
        Self::builder().build(corpus)
    }

    /// All titles, in corpus order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Corpus position of a title (first occurrence for duplicates)
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Title at a corpus position
    pub fn title_at(&self, position: usize) -> Option<&str> {
        self.titles.get(position).map(|t| t.as_str())
    }

    /// Full similarity row for a corpus position.
    ///
    /// Panics if `position` is out of range.
    pub fn similarities_for(&self, position: usize) -> &[f32] {
        self.matrix.row(position)
    }

    /// Similarity between two corpus positions.
    ///
    /// Panics if either position is out of range.
    pub fn similarity(&self, i: usize, j: usize) -> f32 {
        self.matrix.get(i, j)
    }

    /// Feature vector at a corpus position
    pub fn feature_vector(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(|v| v.as_slice())
    }

    /// Number of fitted vocabulary terms
    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    /// Number of movies in the engine
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::MovieRecord;

    fn record(id: u32, title: &str, tags: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            tags: tags.to_string(),
        }
    }

    fn create_test_corpus() -> MovieCorpus {
        MovieCorpus::from_records(vec![
            record(1, "Space One", "space marines fight aliens on pandora jamescameron"),
            record(2, "Space Two", "space marines explore aliens sigourneyweaver"),
            record(3, "Romance One", "widower falls love radio noraephron"),
            record(4, "Romance Two", "widower love letters radio tomhanks"),
            record(5, "Heist One", "crew robs bank vault heist"),
        ])
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let engine = SimilarityEngine::build(&create_test_corpus());

        for i in 0..engine.len() {
            assert!((engine.similarity(i, i) - 1.0).abs() < 1e-6);
            for j in 0..engine.len() {
                assert!(
                    (engine.similarity(i, j) - engine.similarity(j, i)).abs() < 1e-6,
                    "asymmetry at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_related_documents_score_higher_than_unrelated() {
        let engine = SimilarityEngine::build(&create_test_corpus());

        let space_pair = engine.similarity(0, 1);
        let cross_genre = engine.similarity(0, 2);
        assert!(
            space_pair > cross_genre,
            "expected {} > {}",
            space_pair,
            cross_genre
        );
    }

    #[test]
    fn test_identical_documents_score_one() {
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Original", "same exact tags here"),
            record(2, "Remake", "same exact tags here"),
        ]);
        let engine = SimilarityEngine::build(&corpus);
        assert!((engine.similarity(0, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_is_deterministic() {
        let corpus = create_test_corpus();
        let first = SimilarityEngine::build(&corpus);
        let second = SimilarityEngine::build(&corpus);

        assert_eq!(first.len(), second.len());
        assert_eq!(first.vocabulary_len(), second.vocabulary_len());
        for i in 0..first.len() {
            assert_eq!(
                first.similarities_for(i),
                second.similarities_for(i),
                "row {} differs between builds",
                i
            );
        }
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let corpus = create_test_corpus();
        let engine = SimilarityEngine::builder()
            .with_max_features(3)
            .build(&corpus);
        assert_eq!(engine.vocabulary_len(), 3);
    }

    #[test]
    fn test_feature_vectors_align_with_vocabulary() {
        let engine = SimilarityEngine::build(&create_test_corpus());
        for position in 0..engine.len() {
            let vector = engine.feature_vector(position).unwrap();
            assert_eq!(vector.len(), engine.vocabulary_len());
        }
    }

    #[test]
    fn test_title_lookup_and_reverse() {
        let engine = SimilarityEngine::build(&create_test_corpus());

        assert_eq!(engine.position_of("Romance One"), Some(2));
        assert_eq!(engine.title_at(2), Some("Romance One"));
        assert_eq!(engine.position_of("Unknown"), None);
        assert_eq!(engine.title_at(99), None);
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_occurrence() {
        let corpus = MovieCorpus::from_records(vec![
            record(10, "Twin", "first version of the story"),
            record(11, "Twin", "second version of the story"),
            record(12, "Other", "unrelated tags entirely"),
        ]);
        let engine = SimilarityEngine::build(&corpus);

        assert_eq!(engine.position_of("Twin"), Some(0));
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_empty_corpus_builds_empty_engine() {
        let engine = SimilarityEngine::build(&MovieCorpus::from_records(vec![]));
        assert!(engine.is_empty());
        assert_eq!(engine.vocabulary_len(), 0);
        assert_eq!(engine.position_of("Anything"), None);
    }

    #[test]
    fn test_all_stop_word_document_gets_zero_similarity() {
        let corpus = MovieCorpus::from_records(vec![
            record(1, "Stopworded", "the and of with"),
            record(2, "Normal", "space marines pandora"),
        ]);
        let engine = SimilarityEngine::build(&corpus);

        assert_eq!(engine.similarity(0, 1), 0.0);
        // Self-similarity stays pinned at 1.0
        assert_eq!(engine.similarity(0, 0), 1.0);
    }
}
