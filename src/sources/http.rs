//! Bibliography source served over HTTP.

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use url::Url;

use super::locations::with_cache_bust;
use super::{BibSource, SourceError};
use crate::utils::HttpClient;

/// A bibliography fetched from a URL
///
/// When a cache-bust token is set, `v=<token>` is appended to the query so
/// intermediate caches cannot serve a stale copy.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: HttpClient,
    url: Url,
    cache_bust: Option<String>,
}

impl HttpSource {
    pub fn new(client: HttpClient, url: Url) -> Self {
        Self {
            client,
            url,
            cache_bust: None,
        }
    }

    /// Append `v=<token>` to the request URL
    pub fn with_cache_bust(mut self, token: impl Into<String>) -> Self {
        self.cache_bust = Some(token.into());
        self
    }

    /// The URL actually requested
    pub fn request_url(&self) -> String {
        match &self.cache_bust {
            Some(token) => with_cache_bust(self.url.as_str(), token),
            None => self.url.to_string(),
        }
    }
}

#[async_trait]
impl BibSource for HttpSource {
    fn id(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        let url = self.request_url();

        let response = self
            .client
            .client()
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "{} returned status: {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read body of {}: {}", url, e)))
    }
}
