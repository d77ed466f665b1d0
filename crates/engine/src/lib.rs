//! # Engine Crate
//!
//! Turns the prepared tag corpus into a queryable similarity structure:
//! tag documents are TF-IDF vectorized over a capped, stop-word-free
//! vocabulary, and an all-pairs cosine similarity matrix is precomputed
//! once at build time.
//!
//! ## Main Components
//!
//! - **vectorizer**: Tokenizer and TF-IDF vectorizer
//! - **stopwords**: English stop-word list
//! - **similarity**: All-pairs cosine similarity matrix
//! - **engine**: The immutable `SimilarityEngine` and its builder
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::MovieCorpus;
//! use engine::SimilarityEngine;
//!
//! let corpus = MovieCorpus::load_from_files(movies_path, credits_path)?;
//! let engine = SimilarityEngine::builder()
//!     .with_max_features(5000)
//!     .build(&corpus);
//!
//! let row = engine.similarities_for(0);
//! println!("{} movies, {} features", engine.len(), engine.vocabulary_len());
//! ```

// Public modules
pub mod engine;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

// Re-export commonly used types for convenience
pub use engine::{DEFAULT_MAX_FEATURES, SimilarityEngine, SimilarityEngineBuilder};
pub use similarity::SimilarityMatrix;
pub use vectorizer::{TfidfVectorizer, tokenize};
