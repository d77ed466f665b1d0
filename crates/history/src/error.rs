//! Error types for ratings-log loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// The ratings log file is absent or unreadable
    #[error("Ratings log missing: {path}")]
    LogMissing { path: String },

    /// CSV parsing failed partway through the log
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, HistoryError>;
