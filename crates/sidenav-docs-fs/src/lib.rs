//! Filesystem document provider for sidenav.
//!
//! This crate provides [`FsDocs`], a filesystem implementation of
//! [`DocsProvider`]. It handles:
//!
//! - Recursive directory scanning for `.md` and `.mdx` files
//! - YAML front matter (`id`, `title`, `sidebar_label`, `sidebar_position`,
//!   `slug`, `tags`, `draft`)
//! - Title extraction from the first H1 heading
//! - `NNN-` number prefixes on file and directory names
//! - Category metadata from `_category_.json`, `_category_.yml` or
//!   `_category_.yaml`
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use sidenav_docs::DocsProvider;
//! use sidenav_docs_fs::FsDocs;
//!
//! let provider = FsDocs::new(PathBuf::from("docs"));
//! let docs = provider.load()?;
//! for doc in docs.docs() {
//!     println!("{}: {}", doc.id, doc.title);
//! }
//! # Ok::<(), sidenav_docs::DocsError>(())
//! ```

mod front_matter;
mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use sidenav_docs::naming::{
    is_index_doc_name, parse_number_prefix, strip_number_prefix, titlecase_from_slug,
};
use sidenav_docs::{
    CategoryMetadata, DocCollection, DocMetadata, DocsError, DocsErrorKind, DocsProvider,
};

use front_matter::{parse_front_matter, salvage_front_matter, split_front_matter};
use scanner::{Scanner, SourceFile, SourceKind};

/// Backend identifier for error messages.
pub(crate) const BACKEND: &str = "Fs";

/// Filesystem document provider.
///
/// Every [`load`](DocsProvider::load) rescans the source directory, so edits
/// are picked up without any invalidation step.
pub struct FsDocs {
    /// Root directory of the documents.
    source_dir: PathBuf,
    /// Scanner for file discovery.
    scanner: Scanner,
    /// Regex for extracting the first H1 heading.
    h1_regex: Regex,
}

impl FsDocs {
    /// Create a provider rooted at `source_dir`.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            scanner: Scanner::new(source_dir.clone()),
            source_dir,
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
        }
    }

    /// Root directory of the documents.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Build a document record from a markdown file.
    fn build_doc(&self, file: &SourceFile) -> Result<DocMetadata, DocsError> {
        let content = fs::read_to_string(&file.path)
            .map_err(|e| DocsError::io(e, &file.path).with_backend(BACKEND))?;
        let (yaml, body) = split_front_matter(&content);
        let front_matter = yaml
            .map(|yaml| {
                parse_front_matter(yaml).unwrap_or_else(|e| {
                    tracing::warn!(
                        path = %file.path.display(),
                        error = %e,
                        "Ignoring invalid front matter fields"
                    );
                    salvage_front_matter(yaml)
                })
            })
            .unwrap_or_default();

        let stem = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = parse_number_prefix(&stem);
        let dir_id = dir_id(&file.dir);
        let dir_name = dir_id.rsplit_once('/').map_or(dir_id.as_str(), |(_, last)| last);

        let name = front_matter.id.as_deref().unwrap_or(prefix.name);
        let id = join_path(&dir_id, name);

        let title = front_matter
            .title
            .or_else(|| self.extract_title(body))
            .unwrap_or_else(|| titlecase_from_slug(prefix.name));

        let slug = match front_matter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => slug.trim_matches('/').to_owned(),
            Some(slug) => join_path(&dir_id, slug.trim_matches('/')),
            None if is_index_doc_name(prefix.name, dir_name) => dir_id.clone(),
            None => id.clone(),
        };

        Ok(DocMetadata {
            id,
            source_dir: file.dir.clone(),
            title,
            slug,
            position: front_matter
                .sidebar_position
                .or_else(|| prefix.number.map(f64::from)),
            sidebar_label: front_matter.sidebar_label,
            tags: front_matter.tags,
            draft: front_matter.draft,
        })
    }

    /// Extract title from the first H1 heading.
    fn extract_title(&self, body: &str) -> Option<String> {
        let caps = self.h1_regex.captures(body)?;
        Some(caps[1].trim().to_owned())
    }
}

impl DocsProvider for FsDocs {
    fn load(&self) -> Result<DocCollection, DocsError> {
        let files = self.scanner.scan()?;

        let mut docs = Vec::new();
        let mut categories = HashMap::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for file in &files {
            match file.kind {
                SourceKind::Doc => {
                    let doc = self.build_doc(file)?;
                    if let Some(first) = seen.insert(doc.id.clone(), file.path.clone()) {
                        return Err(DocsError::new(DocsErrorKind::DuplicateId)
                            .with_backend(BACKEND)
                            .with_detail(format!(
                                "`{}` is also defined by {}",
                                doc.id,
                                first.display()
                            ))
                            .with_path(&file.path));
                    }
                    docs.push(doc);
                }
                SourceKind::Category => {
                    if categories.contains_key(&file.dir) {
                        tracing::warn!(
                            path = %file.path.display(),
                            "Ignoring extra category metadata file"
                        );
                        continue;
                    }
                    categories.insert(file.dir.clone(), read_category(&file.path)?);
                }
            }
        }

        tracing::info!(
            docs = docs.len(),
            categories = categories.len(),
            source_dir = %self.source_dir.display(),
            "Loaded document collection"
        );

        Ok(DocCollection::new(docs, categories))
    }
}

/// Parse a category metadata file (JSON or YAML by extension).
fn read_category(path: &Path) -> Result<CategoryMetadata, DocsError> {
    let content =
        fs::read_to_string(path).map_err(|e| DocsError::io(e, path).with_backend(BACKEND))?;
    if content.trim().is_empty() {
        return Ok(CategoryMetadata::default());
    }

    let invalid = || {
        DocsError::new(DocsErrorKind::InvalidMetadata)
            .with_backend(BACKEND)
            .with_path(path)
    };

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| invalid().with_source(e))
    } else {
        serde_yaml::from_str(&content).map_err(|e| invalid().with_source(e))
    }
}

/// Directory path with number prefixes stripped from every segment.
fn dir_id(dir: &str) -> String {
    dir.split('/')
        .filter(|s| !s.is_empty())
        .map(strip_number_prefix)
        .collect::<Vec<_>>()
        .join("/")
}

/// Join two slash-separated paths, either of which may be empty.
fn join_path(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, _) => name.to_owned(),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{name}"),
    }
}
