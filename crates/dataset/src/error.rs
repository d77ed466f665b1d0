//! Error types for the dataset crate.

use thiserror::Error;

/// Errors that can occur while loading and preparing the movie corpus.
///
/// Only conditions that make the corpus unusable are errors. Row-level
/// problems (missing fields, malformed encoded cells) drop the row with a
/// warning and never surface here.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Required dataset file absent or unreadable. Fatal: no partial
    /// corpus is usable.
    #[error("Required dataset missing: {path}")]
    SourceMissing { path: String },

    /// A CSV record could not be deserialized at all
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// An encoded cell in a row failed structured-field parsing.
    ///
    /// Returned by the cell parsers; the corpus builder catches it and
    /// drops the row instead of propagating.
    #[error("Malformed record '{title}': {reason}")]
    MalformedRecord { title: String, reason: String },

    /// Every row was dropped during cleaning
    #[error("No usable movie records after cleaning ({rows_read} rows read)")]
    EmptyCorpus { rows_read: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DatasetError>;
