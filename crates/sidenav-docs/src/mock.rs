//! Mock provider for testing.
//!
//! Provides [`MockDocs`] for building synthetic collections without touching
//! the filesystem.

use std::collections::HashMap;

use crate::collection::{CategoryMetadata, DocCollection, DocMetadata};
use crate::{DocsError, DocsProvider};

/// In-memory document provider.
///
/// # Example
///
/// ```
/// use sidenav_docs::{DocsProvider, MockDocs};
///
/// let docs = MockDocs::new()
///     .with_doc("intro", "Introduction")
///     .with_doc("guides/setup", "Setup")
///     .collection();
///
/// assert_eq!(docs.len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockDocs {
    docs: Vec<DocMetadata>,
    categories: HashMap<String, CategoryMetadata>,
}

impl MockDocs {
    /// Create an empty mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document whose directory and slug derive from its id.
    #[must_use]
    pub fn with_doc(self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.with_metadata(DocMetadata::new(id, title))
    }

    /// Add a fully specified document.
    #[must_use]
    pub fn with_metadata(mut self, doc: DocMetadata) -> Self {
        self.docs.push(doc);
        self
    }

    /// Add category metadata for a directory.
    #[must_use]
    pub fn with_category(mut self, dir: impl Into<String>, meta: CategoryMetadata) -> Self {
        self.categories.insert(dir.into(), meta);
        self
    }

    /// Build the collection snapshot.
    #[must_use]
    pub fn collection(&self) -> DocCollection {
        DocCollection::new(self.docs.clone(), self.categories.clone())
    }
}

impl DocsProvider for MockDocs {
    fn load(&self) -> Result<DocCollection, DocsError> {
        Ok(self.collection())
    }
}
