//! In-memory and local-file bibliography sources.

use async_trait::async_trait;
use std::path::PathBuf;

use super::{BibSource, SourceError};

/// Bibliography text that is already available, e.g. embedded in a page
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    label: String,
    text: String,
}

impl EmbeddedSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Raw bytes, e.g. read from stdin; invalid UTF-8 becomes U+FFFD
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(label, String::from_utf8_lossy(bytes))
    }
}

#[async_trait]
impl BibSource for EmbeddedSource {
    fn id(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

/// A bibliography file on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BibSource for FileSource {
    fn id(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        // Invalid UTF-8 (Latin-1 exports) is replaced with U+FFFD
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
