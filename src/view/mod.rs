//! Presentation model for publication lists.
//!
//! Records are turned into [`PublicationItem`]s (title, optional link and a
//! one-line summary) and wrapped in a [`PublicationsView`]. The [`render`]
//! module turns a view into HTML list items or terminal text.

pub mod render;

pub use render::{html_escape, render_html, render_plain};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::index::RecordIndex;
use crate::models::fields;
use crate::models::{Record, RecordCollection};

/// Shown in place of a list when no bibliography could be loaded
pub const FALLBACK_MESSAGE: &str = "Unable to load publications.";

/// Title used for records without one
pub const UNTITLED: &str = "Untitled";

/// Separator between the parts of the summary line
pub const META_SEPARATOR: &str = " · ";

static AUTHOR_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+and\s+").expect("valid regex"));

/// Which list an item is built for; only the latest list shows the year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Latest,
    Grouped,
}

/// One displayable publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub meta: String,
}

/// Items published in the same year (or under the `Other` label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGroup {
    pub label: String,
    pub items: Vec<PublicationItem>,
}

/// What gets rendered for a page section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublicationsView {
    Latest { items: Vec<PublicationItem> },
    Grouped { groups: Vec<YearGroup> },
    Unavailable { message: String },
}

impl PublicationsView {
    /// The view shown when the bibliography could not be retrieved
    pub fn unavailable() -> Self {
        PublicationsView::Unavailable {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, PublicationsView::Unavailable { .. })
    }
}

/// Join authors with commas instead of BibTeX's `and`
pub fn format_authors(authors: Option<&str>) -> String {
    match authors {
        Some(a) => AUTHOR_AND.replace_all(a, ", ").into_owned(),
        None => String::new(),
    }
}

/// Journal/booktitle followed by volume, number and pages, where present
pub fn format_venue(record: &Record) -> String {
    let mut parts = Vec::new();

    if let Some(journal) = record.field(fields::JOURNAL) {
        parts.push(journal.to_string());
    }
    if let Some(booktitle) = record.field(fields::BOOKTITLE) {
        parts.push(booktitle.to_string());
    }
    if let Some(volume) = record.field(fields::VOLUME) {
        parts.push(format!("vol. {}", volume));
    }
    if let Some(number) = record.field(fields::NUMBER) {
        parts.push(format!("no. {}", number));
    }
    if let Some(pages) = record.field(fields::PAGES) {
        parts.push(format!("pp. {}", pages));
    }

    parts.join(", ")
}

/// Summary line: authors, then venue and (latest list only) year
pub fn format_meta(record: &Record, kind: ViewKind) -> String {
    let mut meta = format_authors(record.author());

    let venue = format_venue(record);
    if !venue.is_empty() {
        meta.push_str(META_SEPARATOR);
        meta.push_str(&venue);
    }

    if kind == ViewKind::Latest {
        if let Some(year) = record.year() {
            meta.push_str(META_SEPARATOR);
            meta.push_str(year);
        }
    }

    meta
}

pub fn build_item(record: &Record, kind: ViewKind) -> PublicationItem {
    PublicationItem {
        title: record.title().unwrap_or(UNTITLED).to_string(),
        link: record.link().map(str::to_string),
        meta: format_meta(record, kind),
    }
}

/// Latest `limit` dated publications
pub fn build_latest(records: &RecordCollection, limit: usize) -> PublicationsView {
    let items = RecordIndex::new(records)
        .latest(limit)
        .into_iter()
        .map(|r| build_item(r, ViewKind::Latest))
        .collect();

    PublicationsView::Latest { items }
}

/// Every publication, grouped by year
pub fn build_grouped(records: &RecordCollection) -> PublicationsView {
    let groups = RecordIndex::new(records)
        .grouped_by_year()
        .into_iter()
        .map(|bucket| YearGroup {
            label: bucket.label,
            items: bucket
                .records
                .into_iter()
                .map(|r| build_item(r, ViewKind::Grouped))
                .collect(),
        })
        .collect();

    PublicationsView::Grouped { groups }
}
