//! Ordered fallback over bibliography sources.

use std::sync::Arc;
use url::Url;

use super::file::FileSource;
use super::http::HttpSource;
use super::locations::{candidate_locations, resolve_location, Location};
use super::{BibSource, SourceError};
use crate::bibtex::parse_bib;
use crate::config::SourceConfig;
use crate::models::RecordCollection;
use crate::utils::HttpClient;

/// Text returned by the first source that answered
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub source_id: String,
    pub text: String,
}

/// Sources tried one after another until one succeeds
///
/// There is no concurrency and no retry: each source gets exactly one
/// attempt, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SourceChain {
    sources: Vec<Arc<dyn BibSource>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source (builder style)
    pub fn with(mut self, source: impl BibSource + 'static) -> Self {
        self.push(Arc::new(source));
        self
    }

    pub fn push(&mut self, source: Arc<dyn BibSource>) {
        self.sources.push(source);
    }

    /// Source identifiers in the order they will be tried
    pub fn ids(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fetch from the first source that succeeds.
    ///
    /// A failing source is logged and skipped. The first success ends the
    /// search even when its text is blank; that case is reported as
    /// [`SourceError::Empty`] rather than trying further sources.
    pub async fn fetch_first(&self) -> Result<Retrieved, SourceError> {
        for (attempt, source) in self.sources.iter().enumerate() {
            let id = source.id();
            tracing::debug!("Trying source {}/{}: {}", attempt + 1, self.sources.len(), id);

            match source.fetch().await {
                Ok(text) if text.trim().is_empty() => {
                    tracing::warn!("Source {} returned an empty bibliography", id);
                    return Err(SourceError::Empty(id));
                }
                Ok(text) => {
                    tracing::info!("Loaded bibliography from {}", id);
                    return Ok(Retrieved {
                        source_id: id,
                        text,
                    });
                }
                Err(e) => {
                    tracing::warn!("Source {} failed: {}", id, e);
                }
            }
        }

        Err(SourceError::Exhausted {
            attempts: self.sources.len(),
        })
    }

    /// Fetch and parse, or `None` when no text could be obtained
    pub async fn load_records(&self) -> Option<RecordCollection> {
        match self.fetch_first().await {
            Ok(retrieved) => Some(parse_bib(&retrieved.text)),
            Err(e) => {
                tracing::warn!("Unable to load publications: {}", e);
                None
            }
        }
    }
}

/// Build the chain described by the configuration.
///
/// An embedded bibliography wins outright and is the only source. Otherwise
/// every candidate location becomes a file or HTTP source; HTTP sources get
/// `cache_token` appended when one is given. Candidates that cannot be
/// resolved are logged and left out, and an unparsable `page_url` is
/// treated as unset.
pub fn build_chain(
    config: &SourceConfig,
    client: &HttpClient,
    cache_token: Option<&str>,
) -> SourceChain {
    if let Some(embedded) = &config.embedded {
        tracing::debug!("Using embedded bibliography {}", embedded.display());
        return SourceChain::new().with(FileSource::new(embedded));
    }

    let page_url = config
        .page_url
        .as_deref()
        .and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Ignoring invalid page URL {}: {}", raw, e);
                None
            }
        });

    let candidates = candidate_locations(
        &config.bib_path,
        page_url.as_ref(),
        config.asset_dir.as_deref(),
        &config.default_location,
    );

    let mut chain = SourceChain::new();
    for candidate in candidates {
        match resolve_location(&candidate, page_url.as_ref()) {
            Ok(Location::Http(url)) => {
                let source = HttpSource::new(client.clone(), url);
                let source = match cache_token {
                    Some(token) => source.with_cache_bust(token),
                    None => source,
                };
                chain.push(Arc::new(source));
            }
            Ok(Location::File(path)) => chain.push(Arc::new(FileSource::new(path))),
            Err(e) => tracing::warn!("Skipping candidate {}: {}", candidate, e),
        }
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EmbeddedSource, MockSource};

    #[tokio::test]
    async fn test_first_success_wins() {
        let failing = Arc::new(MockSource::failing("a"));
        let first = Arc::new(MockSource::returning("b", "@misc{b,\n  title = {B},\n}"));
        let second = Arc::new(MockSource::returning("c", "@misc{c,\n  title = {C},\n}"));

        let mut chain = SourceChain::new();
        chain.push(failing.clone());
        chain.push(first.clone());
        chain.push(second.clone());

        let retrieved = chain.fetch_first().await.unwrap();
        assert_eq!(retrieved.source_id, "b");
        assert_eq!(failing.calls(), 1);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_fail() {
        let chain = SourceChain::new()
            .with(MockSource::failing("a"))
            .with(MockSource::failing("b"));

        let err = chain.fetch_first().await.unwrap_err();
        assert!(matches!(err, SourceError::Exhausted { attempts: 2 }));
        assert!(chain.load_records().await.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = SourceChain::new();
        assert!(matches!(
            chain.fetch_first().await,
            Err(SourceError::Exhausted { attempts: 0 })
        ));
    }

    #[tokio::test]
    async fn test_blank_text_stops_search() {
        let later = Arc::new(MockSource::returning("later", "@misc{x,\n  title = {X},\n}"));
        let mut chain = SourceChain::new().with(EmbeddedSource::new("blank", "  \n"));
        chain.push(later.clone());

        assert!(matches!(chain.fetch_first().await, Err(SourceError::Empty(_))));
        assert_eq!(later.calls(), 0);
    }

    #[tokio::test]
    async fn test_load_records() {
        let chain = SourceChain::new().with(EmbeddedSource::new(
            "inline",
            "@article{a,\n  title = {One},\n  year = {2020},\n}",
        ));

        let records = chain.load_records().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_build_chain_embedded_only() {
        let config = SourceConfig {
            embedded: Some("inline.bib".into()),
            ..SourceConfig::default()
        };

        let chain = build_chain(&config, &HttpClient::new().unwrap(), Some("1"));
        assert_eq!(chain.ids(), vec!["inline.bib"]);
    }

    #[test]
    fn test_build_chain_with_page_url() {
        let config = SourceConfig {
            bib_path: "pubs.bib".to_string(),
            page_url: Some("https://site.example/about/".to_string()),
            asset_dir: None,
            default_location: "/pubs.bib".to_string(),
            ..SourceConfig::default()
        };

        let chain = build_chain(&config, &HttpClient::new().unwrap(), Some("7"));
        assert_eq!(
            chain.ids(),
            vec![
                "https://site.example/about/pubs.bib",
                "https://site.example/about/pubs.bib",
                "https://site.example/about/pubs.bib",
                "https://site.example/pubs.bib",
            ]
        );
    }

    #[test]
    fn test_build_chain_local_files() {
        let config = SourceConfig {
            bib_path: "pubs.bib".to_string(),
            page_url: None,
            asset_dir: Some("assets/".to_string()),
            default_location: "/srv/pubs.bib".to_string(),
            ..SourceConfig::default()
        };

        let chain = build_chain(&config, &HttpClient::new().unwrap(), None);
        assert_eq!(
            chain.ids(),
            vec!["pubs.bib", "./pubs.bib", "assets/pubs.bib", "assets/pubs.bib", "/srv/pubs.bib"]
        );
    }

    #[test]
    fn test_build_chain_invalid_page_url() {
        let config = SourceConfig {
            page_url: Some("not a url".to_string()),
            ..SourceConfig::default()
        };

        let chain = build_chain(&config, &HttpClient::new().unwrap(), None);
        assert_eq!(
            chain.ids(),
            vec!["publications.bib", "./publications.bib", "/publications.bib"]
        );
    }
}
