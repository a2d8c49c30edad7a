//! Utility modules supporting bibliography retrieval.
//!
//! - [`HttpClient`]: reqwest client with a user agent and timeouts
//!
//! ```rust,no_run
//! use publist::utils::HttpClient;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_timeout(Duration::from_secs(10))?;
//! let response = client.client().get("https://example.com/publications.bib").send().await?;
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpClient, DEFAULT_TIMEOUT};
