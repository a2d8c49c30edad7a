//! # publist
//!
//! Turns a BibTeX bibliography into publication lists: the latest N entries
//! and the full list grouped by year.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Record, RecordCollection)
//! - [`bibtex`]: Entry parsing, LaTeX cleanup and link resolution
//! - [`index`]: Latest and grouped-by-year views over parsed records
//! - [`view`]: Presentation model and HTML/plain renderers
//! - [`sources`]: Where the bibliography text comes from (embedded, file, HTTP fallbacks)
//! - [`utils`]: Shared HTTP client
//! - [`config`]: Configuration management
//!
//! ```rust
//! use publist::{parse_bib, RecordIndex};
//!
//! let records = parse_bib("@article{a,\n  title = {Hello},\n  year = {2024},\n}");
//! let index = RecordIndex::new(&records);
//! assert_eq!(index.latest(5).len(), 1);
//! ```

pub mod bibtex;
pub mod config;
pub mod index;
pub mod models;
pub mod sources;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use bibtex::{normalize, parse_bib, resolve_link};
pub use index::{RecordIndex, YearBucket, OTHER_LABEL};
pub use models::{Record, RecordCollection};
pub use sources::{BibSource, SourceChain, SourceError};
pub use view::{PublicationItem, PublicationsView, YearGroup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
