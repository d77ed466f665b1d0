//! Parsers for the encoded (JSON-in-CSV) dataset cells.
//!
//! Genre, keyword, cast, and crew columns each hold a JSON list of objects.
//! Every cell is parsed exactly once into typed entries; downstream code
//! works on those, never on the raw strings.

use crate::error::{DatasetError, Result};
use crate::types::{CreditEntry, NamedEntity};

/// How many cast entries contribute tags, in listed order
pub const MAX_CAST_TAGS: usize = 3;

/// Crew role whose holder becomes the director tag
const DIRECTOR_JOB: &str = "Director";

/// Strip all whitespace inside an entity name so it forms a single tag
/// token ("Science Fiction" -> "ScienceFiction").
pub fn compact_name(name: &str) -> String {
    name.split_whitespace().collect()
}

/// Parse an encoded genre/keyword cell into compacted name tags.
///
/// The cell is a JSON list of objects each carrying a `"name"` key. A cell
/// that fails to parse poisons the whole row (`MalformedRecord`); the
/// caller drops it.
pub fn parse_named_list(raw: &str, title: &str) -> Result<Vec<String>> {
    let entities: Vec<NamedEntity> =
        serde_json::from_str(raw).map_err(|e| DatasetError::MalformedRecord {
            title: title.to_string(),
            reason: format!("bad name list: {}", e),
        })?;

    Ok(entities.iter().map(|e| compact_name(&e.name)).collect())
}

/// Parse an encoded cast/crew cell into typed credit entries.
pub fn parse_credit_list(raw: &str, title: &str) -> Result<Vec<CreditEntry>> {
    serde_json::from_str(raw).map_err(|e| DatasetError::MalformedRecord {
        title: title.to_string(),
        reason: format!("bad credit list: {}", e),
    })
}

/// Compacted names of the first `limit` cast entries, in listed order
pub fn cast_tags(entries: &[CreditEntry], limit: usize) -> Vec<String> {
    entries
        .iter()
        .take(limit)
        .map(|e| compact_name(e.name()))
        .collect()
}

/// Compacted name of the first crew entry whose job is "Director", if any
pub fn director_tag(entries: &[CreditEntry]) -> Option<String> {
    entries.iter().find_map(|e| match e {
        CreditEntry::Crew { name, job } if job == DIRECTOR_JOB => Some(compact_name(name)),
        _ => None,
    })
}

/// Flatten one movie's fields into its tag document: overview words, then
/// genre, keyword, cast, and director tags, space-joined and lower-cased.
pub fn build_tag_document(
    overview: &str,
    genres: &[String],
    keywords: &[String],
    cast: &[String],
    director: Option<&str>,
) -> String {
    let mut parts: Vec<&str> = overview.split_whitespace().collect();
    parts.extend(genres.iter().map(|s| s.as_str()));
    parts.extend(keywords.iter().map(|s| s.as_str()));
    parts.extend(cast.iter().map(|s| s.as_str()));
    if let Some(d) = director {
        parts.push(d);
    }

    parts.join(" ").to_lowercase()
}
