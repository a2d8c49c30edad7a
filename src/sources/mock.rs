//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::sources::{BibSource, SourceError};

/// A mock source for testing that returns a predefined response and counts
/// how often it was asked.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    response: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a mock source that fails until a response is set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            response: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source that always answers with `text`
    pub fn returning(id: impl Into<String>, text: impl Into<String>) -> Self {
        let source = Self::new(id);
        source.set_response(text);
        source
    }

    /// A source that always fails
    pub fn failing(id: impl Into<String>) -> Self {
        Self::new(id)
    }

    /// Set the text to return.
    pub fn set_response(&self, text: impl Into<String>) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(text.into());
    }

    /// Number of fetch calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BibSource for MockSource {
    fn id(&self) -> String {
        self.id.clone()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(text) => Ok(text.clone()),
            None => Err(SourceError::Api(format!("{} has no response configured", self.id))),
        }
    }
}
