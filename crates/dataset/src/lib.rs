//! # Dataset Crate
//!
//! Loads and prepares the TMDB movie dataset: two CSV files (metadata and
//! credits) are joined on title, the JSON-encoded cells are parsed once
//! into typed entries, and each movie is flattened into a lower-cased tag
//! document ready for vectorization.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, CreditEntry, MovieCorpus)
//! - **parser**: Parse encoded cells and build tag documents
//! - **corpus**: Load, join, and clean the dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::MovieCorpus;
//! use std::path::Path;
//!
//! let corpus = MovieCorpus::load_from_files(
//!     Path::new("tmdb_5000_movies.csv"),
//!     Path::new("tmdb_5000_credits.csv"),
//! )?;
//!
//! println!("Prepared {} movies", corpus.len());
//! for record in corpus.records().iter().take(3) {
//!     println!("{}: {}", record.title, record.tags);
//! }
//! ```

// Public modules
pub mod corpus;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DatasetError, Result};
pub use types::{CreditEntry, MovieCorpus, MovieId, MovieRecord, NamedEntity};
