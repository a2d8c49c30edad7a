//! Canonical link resolution for parsed records.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::models::fields;

const DOI_BASE: &str = "https://doi.org/";
const ARXIV_ABS_BASE: &str = "https://arxiv.org/abs/";
const ARXIV_JOURNAL_MARKER: &str = "arXiv preprint arXiv:";

static ARXIV_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"arXiv:([0-9.]+)").expect("valid regex"));

/// Pick the single link a record is shown with.
///
/// Checked in order, first present (non-empty) field wins:
///
/// 1. `doi` as `https://doi.org/<doi>`
/// 2. `url` verbatim
/// 3. a `journal` of the form `arXiv preprint arXiv:<id>`, as an arXiv abstract link
/// 4. a `publisher` containing `http`, verbatim
///
/// Once a branch's field is present the chain stops there, so an arXiv
/// journal without an id yields no link even if the publisher is a URL.
pub fn resolve_link(fields: &BTreeMap<String, String>) -> Option<String> {
    let get = |name: &str| {
        fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    };

    if let Some(doi) = get(fields::DOI) {
        Some(format!("{}{}", DOI_BASE, doi))
    } else if let Some(url) = get(fields::URL) {
        Some(url.to_string())
    } else if let Some(journal) = get(fields::JOURNAL).filter(|j| j.contains(ARXIV_JOURNAL_MARKER)) {
        arxiv_id(journal).map(|id| format!("{}{}", ARXIV_ABS_BASE, id))
    } else if let Some(publisher) = get(fields::PUBLISHER).filter(|p| p.contains("http")) {
        Some(publisher.to_string())
    } else {
        None
    }
}

/// First `arXiv:<digits and dots>` identifier in a string
pub fn arxiv_id(text: &str) -> Option<&str> {
    ARXIV_ID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_doi_takes_priority() {
        let f = fields(&[("doi", "10.1/xyz"), ("url", "https://example.com")]);
        assert_eq!(resolve_link(&f), Some("https://doi.org/10.1/xyz".to_string()));
    }

    #[test]
    fn test_doi_not_escaped() {
        let f = fields(&[("doi", "10.1002/(SICI)1097-0258<123::AID>")]);
        assert_eq!(
            resolve_link(&f),
            Some("https://doi.org/10.1002/(SICI)1097-0258<123::AID>".to_string())
        );
    }

    #[test]
    fn test_url_fallback() {
        let f = fields(&[("doi", ""), ("url", "https://example.com/paper")]);
        assert_eq!(resolve_link(&f), Some("https://example.com/paper".to_string()));
    }

    #[test]
    fn test_arxiv_journal() {
        let f = fields(&[("journal", "arXiv preprint arXiv:2301.01234")]);
        assert_eq!(
            resolve_link(&f),
            Some("https://arxiv.org/abs/2301.01234".to_string())
        );
    }

    #[test]
    fn test_arxiv_journal_without_id_stops_chain() {
        let f = fields(&[
            ("journal", "arXiv preprint arXiv: forthcoming"),
            ("publisher", "https://publisher.example"),
        ]);
        assert_eq!(resolve_link(&f), None);
    }

    #[test]
    fn test_non_arxiv_journal_falls_through() {
        let f = fields(&[
            ("journal", "Physical Review E"),
            ("publisher", "https://journals.aps.org"),
        ]);
        assert_eq!(resolve_link(&f), Some("https://journals.aps.org".to_string()));
    }

    #[test]
    fn test_publisher_without_http() {
        let f = fields(&[("publisher", "Springer")]);
        assert_eq!(resolve_link(&f), None);
    }

    #[test]
    fn test_no_link_sources() {
        let f = fields(&[("title", "Untethered"), ("journal", "Nature")]);
        assert_eq!(resolve_link(&f), None);
    }

    #[test]
    fn test_arxiv_id_extraction() {
        assert_eq!(arxiv_id("arXiv preprint arXiv:1706.03762v5"), Some("1706.03762"));
        assert_eq!(arxiv_id("arXiv:"), None);
        assert_eq!(arxiv_id("no identifier"), None);
    }
}
