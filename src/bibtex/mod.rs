//! BibTeX entry parsing.
//!
//! The grammar is deliberately line-oriented: every field must sit on a
//! single line as `name = {value}` or `name = "value"`, optionally followed
//! by a comma. This covers bibliographies exported by reference managers and
//! Google Scholar, but not hand-written files that spread a value over
//! several lines, nest braces across lines, or use `@string` macros.
//!
//! Parsing never fails. Entries without a body and lines that do not look
//! like a field are skipped.

mod link;
mod normalize;

pub use link::{arxiv_id, resolve_link};
pub use normalize::normalize;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{Record, RecordCollection};
use crate::sources::SourceError;

static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([a-zA-Z]+)\s*=\s*[{"](.*)[}"]\s*,?$"#).expect("valid regex")
});

/// Parse a bibliography into records, in document order.
///
/// The text is split on `@`; whatever precedes the first `@` is ignored.
/// Within each entry the entry type before the first `{` is dropped, then
/// each line of the body is matched as a field (the cite key line never
/// matches). Lines starting with `%` are comments.
///
/// Known limitations of the single-pass grammar:
///
/// - values spanning several lines are not read
/// - an `@` inside a value starts a new entry
/// - a closing `}` or `"` inside a value may cut it short
///
/// ```
/// use publist::parse_bib;
///
/// let records = parse_bib(r#"
/// @article{doe2023,
///   title = {Networks \& Dynamics},
///   year = "2023",
///   doi = {10.1/xyz},
/// }
/// "#);
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records.get(0).unwrap().title(), Some("Networks & Dynamics"));
/// assert_eq!(records.get(0).unwrap().link(), Some("https://doi.org/10.1/xyz"));
/// ```
pub fn parse_bib(text: &str) -> RecordCollection {
    let mut records = RecordCollection::new();

    for (position, chunk) in text.split('@').skip(1).enumerate() {
        let Some(body_start) = chunk.find('{') else {
            tracing::trace!("Skipping entry {} without a body", position);
            continue;
        };

        let fields = parse_fields(&chunk[body_start + 1..]);
        if fields.is_empty() {
            tracing::debug!("Skipping entry {} with no readable fields", position);
            continue;
        }

        records.push(Record::new(fields));
    }

    tracing::debug!("Parsed {} records", records.len());
    records
}

/// Read a bibliography file from disk and parse it
pub fn parse_bib_file(path: &Path) -> Result<RecordCollection, SourceError> {
    let bytes = std::fs::read(path)?;
    Ok(parse_bib(&String::from_utf8_lossy(&bytes)))
}

/// Extract the `name = value` fields of one entry body
fn parse_fields(body: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for line in body.trim().lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let Some(caps) = FIELD_LINE.captures(line) else {
            tracing::trace!("Ignoring line: {}", line);
            continue;
        };

        let key = caps[1].to_lowercase();
        let value = normalize(caps[2].trim());

        // Duplicates overwrite; flag them since it usually means a copy/paste slip
        if let Some(previous) = fields.insert(key.clone(), value) {
            tracing::debug!("Field '{}' repeated, replacing '{}'", key, previous);
        }
    }

    fields
}
