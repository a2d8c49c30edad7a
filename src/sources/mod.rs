//! Where the bibliography text comes from.
//!
//! A [`BibSource`] produces the raw text of a bibliography. Three kinds exist:
//!
//! - [`EmbeddedSource`]: text already in memory (stdin, a string in a page)
//! - [`FileSource`]: a local file
//! - [`HttpSource`]: a URL, optionally with a cache-busting query parameter
//!
//! Sources are tried in order by a [`SourceChain`] until one answers. The
//! list of candidate locations mirrors what a static site needs: the
//! configured path, its `./` variant, the path resolved against the page URL,
//! the same path under the asset directory, and a final default location.
//!
//! ```rust,no_run
//! use publist::sources::{EmbeddedSource, SourceChain};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let chain = SourceChain::new()
//!     .with(EmbeddedSource::new("inline", "@misc{a,\n  title = {Hi},\n}"));
//!
//! let records = chain.load_records().await;
//! assert_eq!(records.map(|r| r.len()), Some(1));
//! # }
//! ```

mod chain;
mod file;
mod http;
mod locations;
pub mod mock;

pub use chain::{build_chain, Retrieved, SourceChain};
pub use file::{EmbeddedSource, FileSource};
pub use http::HttpSource;
pub use locations::{
    cache_bust_token, candidate_locations, resolve_location, with_cache_bust, Location,
};
pub use mock::MockSource;

use async_trait::async_trait;

/// A place the bibliography text can be read from
#[async_trait]
pub trait BibSource: Send + Sync + std::fmt::Debug {
    /// Identifier used in logs (a path, URL or label)
    fn id(&self) -> String;

    /// Fetch the complete bibliography text
    async fn fetch(&self) -> Result<String, SourceError>;
}

/// Errors that can occur while retrieving a bibliography
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// A candidate location could not be turned into a path or URL
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source answered but the text was empty
    #[error("Empty bibliography from {0}")]
    Empty(String),

    /// Every candidate failed
    #[error("No bibliography available after {attempts} attempts")]
    Exhausted { attempts: usize },
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidLocation(err.to_string())
    }
}
