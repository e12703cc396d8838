//! Document collection model for sidenav.
//!
//! This crate describes the documents a sidebar can point at, independent of
//! where they come from:
//!
//! - [`DocMetadata`]: one document record (id, source directory, title, slug,
//!   position, tags, draft flag)
//! - [`CategoryMetadata`]: per-directory category settings (label, position,
//!   collapse behavior, link)
//! - [`DocCollection`]: an immutable snapshot with id and directory lookups
//! - [`DocsProvider`]: the trait backends implement to produce a snapshot
//! - [`MockDocs`]: in-memory provider for tests (behind the `mock` feature)
//!
//! # Directory Convention
//!
//! Directories are relative, slash-separated and never carry a leading or
//! trailing slash. The collection root is the empty string; `"."` and
//! `"./guides/"` are accepted on input and normalized by
//! [`normalize_dir_name`].
//!
//! # Example
//!
//! ```
//! use sidenav_docs::{DocCollection, DocMetadata};
//!
//! let docs = DocCollection::new(
//!     vec![
//!         DocMetadata::new("intro", "Introduction"),
//!         DocMetadata::new("guides/setup", "Setup"),
//!     ],
//!     Default::default(),
//! );
//!
//! assert!(docs.get("guides/setup").is_some());
//! assert_eq!(docs.docs_in_dir("guides").count(), 1);
//! ```

mod collection;
mod error;
#[cfg(feature = "mock")]
mod mock;
pub mod naming;

pub use collection::{
    CategoryLinkConfig, CategoryMetadata, DocCollection, DocMetadata, is_in_dir,
    normalize_dir_name,
};
pub use error::{DocsError, DocsErrorKind};
#[cfg(feature = "mock")]
pub use mock::MockDocs;

/// Source of document collection snapshots.
///
/// Implementations scan their backend and return a complete, consistent
/// [`DocCollection`]. The sidebar pipeline never holds on to a provider; it
/// only consumes the snapshot.
pub trait DocsProvider: Send + Sync {
    /// Load a snapshot of all documents and category metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError`] if the backend cannot be read or contains
    /// invalid metadata.
    fn load(&self) -> Result<DocCollection, DocsError>;
}
