//! Ratings-log loading and favorite sampling.
//!
//! The log is a viewing-history export with `Name` and `Rating` columns;
//! extra export columns (dates, years, URLs) are ignored. Sampling picks
//! one well-rated title uniformly at random so repeated runs seed the
//! recommender with different favorites.

use crate::error::{HistoryError, Result};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{debug, warn};

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Rating floor for favorite sampling (default: 4.0 on a five-star scale)
pub const DEFAULT_MIN_RATING: f32 = 4.0;

/// One usable row of the ratings log
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub name: String,
    pub rating: f32,
}

/// Raw CSV row. Both columns are optional so half-filled exports
/// deserialize instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct LogRow {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Rating")]
    rating: Option<f32>,
}

/// An in-memory ratings log.
#[derive(Debug, Clone, Default)]
pub struct RatingLog {
    entries: Vec<LogEntry>,
}

impl RatingLog {
    /// Load the log from a CSV file.
    ///
    /// A file that cannot be opened is reported as
    /// [`HistoryError::LogMissing`]. Callers that want to degrade instead
    /// of failing use [`sample_favorite`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|_| HistoryError::LogMissing {
            path: path.display().to_string(),
        })?;
        Self::from_reader(file)
    }

    /// Read log rows from any CSV source. Rows missing a name or carrying
    /// a blank or unparsable rating are skipped; structural CSV failures
    /// (bad UTF-8, wrong field counts) fail the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for row in csv_reader.deserialize::<LogRow>() {
            // An unparsable cell drops only that row; reader-level errors
            // still fail the load
            let row = match row {
                Ok(row) => row,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            match (row.name, row.rating) {
                (Some(name), Some(rating)) if !name.trim().is_empty() => {
                    entries.push(LogEntry { name, rating });
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} log rows without a usable name or rating", skipped);
        }
        debug!("Loaded ratings log with {} entries", entries.len());

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick one eligible title uniformly at random: rated at or above
    /// `min_rating` and not in the caller's excluded set. `None` when no
    /// entry qualifies.
    ///
    /// The excluded set belongs to the caller, so exclusions can span
    /// multiple logs or sampling rounds.
    pub fn sample(&self, min_rating: f32, excluded: &HashSet<String>) -> Option<&str> {
        self.sample_with_rng(min_rating, excluded, &mut rand::rng())
    }

    /// [`sample`](Self::sample) with an explicit RNG, for deterministic
    /// tests and seeded runs.
    pub fn sample_with_rng<R>(
        &self,
        min_rating: f32,
        excluded: &HashSet<String>,
        rng: &mut R,
    ) -> Option<&str>
    where
        R: Rng + ?Sized,
    {
        let eligible: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| entry.rating >= min_rating && !excluded.contains(&entry.name))
            .map(|entry| entry.name.as_str())
            .collect();

        eligible.choose(rng).copied()
    }
}

/// Degradable favorite lookup: load the log at `path` and sample one
/// eligible title. A missing log warns and returns `None` rather than
/// failing, so callers can fall back to another seed.
pub fn sample_favorite(
    path: &Path,
    min_rating: f32,
    excluded: &HashSet<String>,
) -> Option<String> {
    match RatingLog::load(path) {
        Ok(log) => log.sample(min_rating, excluded).map(String::from),
        Err(err) => {
            warn!("Ratings log unavailable ({}); skipping history sampling", err);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
