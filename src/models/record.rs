//! Record model representing one publication entry of a bibliography.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bibtex::resolve_link;

/// Field names consumed by the views
pub mod fields {
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const YEAR: &str = "year";
    pub const JOURNAL: &str = "journal";
    pub const BOOKTITLE: &str = "booktitle";
    pub const VOLUME: &str = "volume";
    pub const NUMBER: &str = "number";
    pub const PAGES: &str = "pages";
    pub const DOI: &str = "doi";
    pub const URL: &str = "url";
    pub const PUBLISHER: &str = "publisher";
}

/// A single publication parsed from one `@type{...}` entry
///
/// Field names are lower-cased and values are already LaTeX-cleaned. The
/// canonical link is resolved once, when the record is built, and is kept
/// apart from the source fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Normalized field values keyed by lower-cased field name
    fields: BTreeMap<String, String>,

    /// Canonical URL derived from doi/url/arXiv journal/publisher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

impl Record {
    /// Build a record from its fields, resolving the link
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        let link = resolve_link(&fields);
        Self { fields, link }
    }

    /// Non-empty value of a field
    ///
    /// Empty values are treated the same as missing ones.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// All fields, including empty ones
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.field(fields::TITLE)
    }

    pub fn author(&self) -> Option<&str> {
        self.field(fields::AUTHOR)
    }

    pub fn year(&self) -> Option<&str> {
        self.field(fields::YEAR)
    }

    /// Year as a number, if the year field is an integer
    pub fn numeric_year(&self) -> Option<i64> {
        self.year().and_then(|y| y.trim().parse().ok())
    }
}

/// Builder for constructing Record objects
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    fields: BTreeMap<String, String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; the name is lower-cased
    pub fn field(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.field(fields::TITLE, title)
    }

    pub fn author(self, author: impl Into<String>) -> Self {
        self.field(fields::AUTHOR, author)
    }

    pub fn year(self, year: impl Into<String>) -> Self {
        self.field(fields::YEAR, year)
    }

    pub fn doi(self, doi: impl Into<String>) -> Self {
        self.field(fields::DOI, doi)
    }

    /// Build the Record, or `None` when no field was set
    pub fn build(self) -> Option<Record> {
        if self.fields.is_empty() {
            None
        } else {
            Some(Record::new(self.fields))
        }
    }
}

/// Records produced by a single parse, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for RecordCollection {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordCollection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RecordBuilder::new()
            .title("Test Paper")
            .author("John Doe and Jane Smith")
            .year("2021")
            .doi("10.1234/test.1234")
            .build()
            .unwrap();

        assert_eq!(record.title(), Some("Test Paper"));
        assert_eq!(record.author(), Some("John Doe and Jane Smith"));
        assert_eq!(record.numeric_year(), Some(2021));
        assert_eq!(record.link(), Some("https://doi.org/10.1234/test.1234"));
    }

    #[test]
    fn test_builder_without_fields() {
        assert!(RecordBuilder::new().build().is_none());
    }

    #[test]
    fn test_empty_field_is_absent() {
        let record = RecordBuilder::new()
            .title("")
            .field("Journal", "Nature")
            .build()
            .unwrap();

        assert_eq!(record.title(), None);
        assert_eq!(record.field("journal"), Some("Nature"));
        assert!(record.fields().contains_key("title"));
    }

    #[test]
    fn test_numeric_year() {
        let numeric = RecordBuilder::new().year(" 2019 ").build().unwrap();
        assert_eq!(numeric.numeric_year(), Some(2019));

        let in_press = RecordBuilder::new().year("in press").build().unwrap();
        assert_eq!(in_press.year(), Some("in press"));
        assert_eq!(in_press.numeric_year(), None);
    }

    #[test]
    fn test_record_serializes_link() {
        let record = RecordBuilder::new()
            .title("Linked")
            .field("url", "https://example.com")
            .build()
            .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"]["title"], "Linked");
        assert_eq!(json["link"], "https://example.com");

        let plain = RecordBuilder::new().title("Plain").build().unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("link").is_none());
    }

    #[test]
    fn test_collection_order() {
        let records: RecordCollection = ["a", "b", "c"]
            .iter()
            .filter_map(|t| RecordBuilder::new().title(*t).build())
            .collect();

        let titles: Vec<_> = records.iter().filter_map(Record::title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(records.len(), 3);
        assert!(!records.is_empty());
    }
}
