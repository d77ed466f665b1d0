//! Core domain types for the TMDB movie corpus.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (the credits file's `movie_id` column)
pub type MovieId = u32;

// =============================================================================
// Cleaned Record Types
// =============================================================================

/// A cleaned movie record: one row of the joined dataset after tag
/// construction.
///
/// Invariant: `tags` is non-empty and fully lower-cased. Rows that would
/// violate this are dropped during preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Tag document: overview words + genre/keyword/cast/director tags,
    /// space-joined and lower-cased
    pub tags: String,
}

/// One entry of an encoded genre or keyword list (`[{"id": 28, "name":
/// "Action"}, ...]`). Extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

/// One entry of an encoded cast or crew list, parsed once into a typed
/// representation.
///
/// Crew objects carry a `job` key and cast objects do not, so the untagged
/// deserializer must try `Crew` first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreditEntry {
    Crew { name: String, job: String },
    Cast { name: String },
}

impl CreditEntry {
    /// The person's name regardless of variant
    pub fn name(&self) -> &str {
        match self {
            CreditEntry::Crew { name, .. } => name,
            CreditEntry::Cast { name } => name,
        }
    }
}

// =============================================================================
// Raw CSV Row Types
// =============================================================================
// Deserialized by header name; extra columns in either file are ignored.
// String columns are Options so an empty cell reads as None (missing data).

/// Raw row of the movie-metadata file
#[derive(Debug, Deserialize)]
pub struct MetadataRow {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
}

/// Raw row of the credits file
#[derive(Debug, Deserialize)]
pub struct CreditsRow {
    pub movie_id: Option<MovieId>,
    pub title: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

// =============================================================================
// MovieCorpus - The Prepared In-Memory Dataset
// =============================================================================

/// The cleaned movie corpus, in joined-dataset order.
///
/// Built once by the preparation stage (see `load_from_files` /
/// `from_readers`) and immutable thereafter. Record position is the
/// canonical index downstream: feature vectors and similarity-matrix rows
/// align with it.
#[derive(Debug, Clone)]
pub struct MovieCorpus {
    pub(crate) records: Vec<MovieRecord>,
}

impl MovieCorpus {
    /// Build a corpus directly from prepared records (test and bench
    /// fixtures; file loading goes through the preparation stage)
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    /// All records, in corpus order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Record at a given corpus position
    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    /// Iterate titles in corpus order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
