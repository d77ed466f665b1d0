//! Corpus preparation: load the two dataset files, join them on title, and
//! build the cleaned movie records.
//!
//! Steps:
//! 1. Read both CSVs into raw rows (in parallel for the file path)
//! 2. Index credits by title, first occurrence wins
//! 3. Walk metadata rows in order: join, drop incomplete/malformed rows,
//!    parse encoded cells once, build the tag document
//! 4. Log a preparation summary

use crate::error::{DatasetError, Result};
use crate::parser;
use crate::types::{CreditsRow, MetadataRow, MovieCorpus, MovieId, MovieRecord};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};

impl MovieCorpus {
    /// Load and prepare the corpus from the metadata and credits files.
    ///
    /// A missing or unreadable file is fatal (`SourceMissing`): no partial
    /// corpus is usable downstream.
    #[instrument(skip_all)]
    pub fn load_from_files(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        let movies_file = open_source(movies_path)?;
        let credits_file = open_source(credits_path)?;

        // Parse both files in parallel
        let (metadata, credits) = rayon::join(
            || read_rows::<MetadataRow, _>(movies_file),
            || read_rows::<CreditsRow, _>(credits_file),
        );

        Self::prepare(metadata?, credits?)
    }

    /// Prepare the corpus from any pair of CSV readers (in-memory fixtures
    /// in tests, files in production)
    pub fn from_readers<M: Read, C: Read>(movies: M, credits: C) -> Result<Self> {
        let metadata = read_rows::<MetadataRow, _>(movies)?;
        let credits = read_rows::<CreditsRow, _>(credits)?;
        Self::prepare(metadata, credits)
    }

    fn prepare(metadata: Vec<MetadataRow>, credits: Vec<CreditsRow>) -> Result<Self> {
        let metadata_rows = metadata.len();
        let credits_rows = credits.len();

        // Join index: title -> credits row, first occurrence wins
        let mut credits_by_title: HashMap<String, CreditsRow> = HashMap::new();
        for row in credits {
            let Some(title) = non_blank_ref(&row.title).map(String::from) else {
                continue;
            };
            match credits_by_title.entry(title) {
                Entry::Occupied(entry) => {
                    warn!(
                        "Duplicate title {:?} in credits; keeping first occurrence",
                        entry.key()
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(row);
                }
            }
        }

        let mut records = Vec::new();
        let mut dropped_missing = 0usize;
        let mut dropped_unjoined = 0usize;
        let mut dropped_malformed = 0usize;

        for row in metadata {
            let MetadataRow {
                title,
                overview,
                genres,
                keywords,
            } = row;

            // Missing data in any used field drops the row
            let (Some(title), Some(overview), Some(genres_raw), Some(keywords_raw)) = (
                non_blank(title),
                non_blank(overview),
                non_blank(genres),
                non_blank(keywords),
            ) else {
                dropped_missing += 1;
                continue;
            };

            // Inner join: metadata without a credits counterpart is dropped
            let Some(credit) = credits_by_title.get(title.as_str()) else {
                dropped_unjoined += 1;
                continue;
            };
            let (Some(id), Some(cast_raw), Some(crew_raw)) = (
                credit.movie_id,
                non_blank_ref(&credit.cast),
                non_blank_ref(&credit.crew),
            ) else {
                dropped_missing += 1;
                continue;
            };

            match build_record(id, &title, &overview, &genres_raw, &keywords_raw, cast_raw, crew_raw)
            {
                Ok(record) => {
                    // Every retained record carries a non-empty tag document
                    if record.tags.is_empty() {
                        dropped_missing += 1;
                        continue;
                    }
                    records.push(record);
                }
                Err(err) => {
                    warn!("Dropping row: {}", err);
                    dropped_malformed += 1;
                }
            }
        }

        info!(
            "Prepared {} movie records from {} metadata / {} credits rows \
             ({} missing-field, {} unjoined, {} malformed drops)",
            records.len(),
            metadata_rows,
            credits_rows,
            dropped_missing,
            dropped_unjoined,
            dropped_malformed
        );

        if records.is_empty() {
            return Err(DatasetError::EmptyCorpus {
                rows_read: metadata_rows,
            });
        }

        Ok(Self { records })
    }
}

/// Parse one joined row's encoded cells and flatten it into a record.
/// Any malformed cell fails the whole row (`MalformedRecord`).
fn build_record(
    id: MovieId,
    title: &str,
    overview: &str,
    genres_raw: &str,
    keywords_raw: &str,
    cast_raw: &str,
    crew_raw: &str,
) -> Result<MovieRecord> {
    let genres = parser::parse_named_list(genres_raw, title)?;
    let keywords = parser::parse_named_list(keywords_raw, title)?;
    let cast_entries = parser::parse_credit_list(cast_raw, title)?;
    let crew_entries = parser::parse_credit_list(crew_raw, title)?;

    let cast = parser::cast_tags(&cast_entries, parser::MAX_CAST_TAGS);
    let director = parser::director_tag(&crew_entries);

    let tags = parser::build_tag_document(overview, &genres, &keywords, &cast, director.as_deref());

    Ok(MovieRecord {
        id,
        title: title.to_string(),
        tags,
    })
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| DatasetError::SourceMissing {
        path: path.display().to_string(),
    })
}

fn read_rows<T: serde::de::DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
