//! TF-IDF vectorization of tag documents.
//!
//! ## Algorithm
//! 1. Tokenize every document (lower-case, alphanumeric runs of length >= 2,
//!    stop words removed)
//! 2. Rank terms by total corpus frequency and cap the vocabulary at
//!    `max_features`; assign feature positions alphabetically
//! 3. Weight with smoothed inverse document frequency:
//!    `idf(t) = ln((1 + docs) / (1 + df(t))) + 1`
//! 4. Vector cell = term count * idf; each vector is L2-normalized so
//!    cosine similarity reduces to a dot product

use crate::stopwords;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Split a document into lower-cased content tokens.
///
/// A token is a maximal run of alphanumeric/underscore characters, kept
/// only if it has at least two characters and is not a stop word.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !stopwords::is_stop_word(t))
        .map(String::from)
        .collect()
}

/// A fitted TF-IDF vectorizer: capped vocabulary plus per-term idf weights.
///
/// Feature positions are alphabetical over the selected vocabulary, so a
/// given corpus always produces the same layout.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Selected terms in feature-position order (alphabetical)
    vocabulary: Vec<String>,
    term_index: HashMap<String, usize>,
    idf: Vec<f32>,
    max_features: usize,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf weights over the corpus documents
    pub fn fit<'a, I>(documents: I, max_features: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = documents.into_iter().map(tokenize).collect();
        Self::fit_tokens(&tokenized, max_features)
    }

    /// Fit over the documents and return their vectors in input order
    pub fn fit_transform<'a, I>(documents: I, max_features: usize) -> (Self, Vec<Vec<f32>>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = documents.into_iter().map(tokenize).collect();
        let vectorizer = Self::fit_tokens(&tokenized, max_features);
        let vectors = tokenized
            .iter()
            .map(|tokens| vectorizer.vector_for(tokens))
            .collect();
        (vectorizer, vectors)
    }

    /// Vectorize a single document against the fitted vocabulary.
    /// Terms outside the vocabulary contribute nothing.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        self.vector_for(&tokenize(document))
    }

    fn fit_tokens(tokenized: &[Vec<String>], max_features: usize) -> Self {
        let n_docs = tokenized.len();

        // Total and per-document term frequencies
        let mut total_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *total_counts.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        // Cap: most frequent terms win, ties broken alphabetically
        let mut ranked: Vec<(&str, usize)> = total_counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        // Feature positions are alphabetical over the selected terms
        let mut vocabulary: Vec<String> =
            ranked.into_iter().map(|(term, _)| term.to_string()).collect();
        vocabulary.sort_unstable();

        let idf: Vec<f32> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0);
                ((1 + n_docs) as f32 / (1 + df) as f32).ln() + 1.0
            })
            .collect();

        let term_index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(position, term)| (term.clone(), position))
            .collect();

        debug!(
            "Fitted vocabulary of {} terms over {} documents",
            vocabulary.len(),
            n_docs
        );

        Self {
            vocabulary,
            term_index,
            idf,
            max_features,
        }
    }

    /// L2-normalized tf-idf vector for one tokenized document
    fn vector_for(&self, tokens: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for token in tokens {
            if let Some(&position) = self.term_index.get(token.as_str()) {
                // Accumulating idf per occurrence gives count * idf
                vector[position] += self.idf[position];
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for cell in &mut vector {
                *cell /= norm;
            }
        }

        vector
    }

    /// Selected terms in feature-position order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Feature position of a term, if selected
    pub fn term_position(&self, term: &str) -> Option<usize> {
        self.term_index.get(term).copied()
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_on_non_word() {
        let tokens = tokenize("Batman: Year-One (1987)");
        assert_eq!(tokens, vec!["batman", "year", "1987"]);
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let tokens = tokenize("a paraplegic marine is dispatched to the moon");
        // "a" is too short, "is"/"to"/"the" are stop words
        assert_eq!(tokens, vec!["paraplegic", "marine", "dispatched", "moon"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_vocabulary_positions_are_alphabetical() {
        let vectorizer = TfidfVectorizer::fit(["zebra apple", "apple mango"], 100);
        assert_eq!(vectorizer.vocabulary(), &["apple", "mango", "zebra"]);
        assert_eq!(vectorizer.term_position("apple"), Some(0));
        assert_eq!(vectorizer.term_position("zebra"), Some(2));
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        // "apple" appears twice, "zebra" and "mango" once each; the tie
        // breaks alphabetically in mango's favor
        let vectorizer = TfidfVectorizer::fit(["zebra apple", "apple mango"], 2);
        assert_eq!(vectorizer.vocabulary(), &["apple", "mango"]);
        assert_eq!(vectorizer.term_position("zebra"), None);
    }

    #[test]
    fn test_stop_words_never_enter_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(["the the the batman"], 100);
        assert_eq!(vectorizer.vocabulary(), &["batman"]);
    }

    #[test]
    fn test_idf_downweights_ubiquitous_terms() {
        // "shared" is in both documents, "rare" in one; idf(shared) = 1.0,
        // idf(rare) = ln(3/2) + 1
        let (vectorizer, vectors) =
            TfidfVectorizer::fit_transform(["shared rare", "shared common"], 100);

        let shared = vectorizer.term_position("shared").unwrap();
        let rare = vectorizer.term_position("rare").unwrap();

        // Both terms appear once in doc 0, so the cell ordering reflects idf
        assert!(vectors[0][rare] > vectors[0][shared]);
    }

    #[test]
    fn test_vectors_are_l2_normalized() {
        let (_, vectors) = TfidfVectorizer::fit_transform(["alpha beta gamma", "beta delta"], 100);
        for vector in &vectors {
            let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-6, "norm was {}", norm);
        }
    }

    #[test]
    fn test_transform_unknown_terms_yields_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(["alpha beta"], 100);
        let vector = vectorizer.transform("unrelated words entirely");
        assert!(vector.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_vector_length_matches_vocabulary() {
        let (vectorizer, vectors) =
            TfidfVectorizer::fit_transform(["alpha beta gamma", "beta delta"], 100);
        for vector in &vectors {
            assert_eq!(vector.len(), vectorizer.vocabulary_len());
        }
    }
}
