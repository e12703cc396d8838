//! Category trees mirrored from the document directory layout.
//!
//! [`generate`] is a pure function of the document collection: it groups the
//! documents below a directory by sub-directory and orders every level. The
//! processor turns the result into sidebar items.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use sidenav_docs::naming::{humanize_name, is_index_doc_name, parse_number_prefix};
use sidenav_docs::{CategoryMetadata, DocCollection, DocMetadata, normalize_dir_name};

use crate::options::{CategoryIndexPolicy, ItemsOrder, SidebarOptions};

/// A directory of the document collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDir<'a> {
    /// Normalized directory path ("" for the root).
    pub dir: String,
    /// Metadata label, or the humanized directory name.
    pub label: String,
    /// Metadata position, or the directory's number prefix.
    pub position: Option<f64>,
    /// Category metadata file contents, if any.
    pub metadata: Option<&'a CategoryMetadata>,
    /// Document the category links to, moved out of `items`.
    pub index_doc: Option<&'a DocMetadata>,
    /// Ordered children.
    pub items: Vec<GeneratedItem<'a>>,
}

/// Entry within a [`GeneratedDir`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedItem<'a> {
    /// A document directly in the directory.
    Doc(&'a DocMetadata),
    /// A sub-directory.
    Dir(GeneratedDir<'a>),
}

impl GeneratedItem<'_> {
    fn position(&self) -> Option<f64> {
        match self {
            Self::Doc(doc) => doc.position,
            Self::Dir(dir) => dir.position,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Doc(doc) => doc.display_label(),
            Self::Dir(dir) => &dir.label,
        }
    }

    /// Path used as the final tie-break.
    fn path(&self) -> &str {
        match self {
            Self::Doc(doc) => &doc.id,
            Self::Dir(dir) => &dir.dir,
        }
    }
}

impl GeneratedDir<'_> {
    /// Last path segment as on disk.
    fn name(&self) -> &str {
        self.dir.rsplit('/').next().unwrap_or_default()
    }

    /// Move the directory's index document out of `items` into `index_doc`.
    ///
    /// Does nothing under [`CategoryIndexPolicy::None`] or when the metadata
    /// already declares a link.
    pub fn extract_index(&mut self, policy: CategoryIndexPolicy) {
        if policy == CategoryIndexPolicy::None || self.metadata.is_some_and(|m| m.link.is_some()) {
            return;
        }
        let name = self.name();
        let found = self.items.iter().position(|item| {
            matches!(item, GeneratedItem::Doc(doc) if is_index_doc_name(doc.name(), name))
        });
        if let Some(index) = found
            && let GeneratedItem::Doc(doc) = self.items.remove(index)
        {
            self.index_doc = Some(doc);
        }
    }
}

/// Build the tree below `dir_name`.
///
/// Drafts are left out unless the options include them. Sub-directories
/// become nested [`GeneratedDir`]s with their index documents extracted.
/// Returns `None` when no document at all, draft or not, lives below
/// `dir_name`.
#[must_use]
pub fn generate<'a>(
    docs: &'a DocCollection,
    dir_name: &str,
    options: &SidebarOptions,
) -> Option<GeneratedDir<'a>> {
    let dir = normalize_dir_name(dir_name);
    docs.docs_in_dir(&dir).next()?;

    let members = docs
        .docs_in_dir(&dir)
        .filter(|doc| options.is_visible(doc.draft))
        .collect();

    Some(build_dir(docs, dir, members, options))
}

fn build_dir<'a>(
    docs: &'a DocCollection,
    dir: String,
    members: Vec<&'a DocMetadata>,
    options: &SidebarOptions,
) -> GeneratedDir<'a> {
    let mut items = Vec::new();
    let mut subdirs: BTreeMap<&'a str, Vec<&'a DocMetadata>> = BTreeMap::new();

    for doc in members {
        match relative_dir(&doc.source_dir, &dir) {
            "" => items.push(GeneratedItem::Doc(doc)),
            rel => {
                let segment = rel.split('/').next().unwrap_or(rel);
                subdirs.entry(segment).or_default().push(doc);
            }
        }
    }

    for (segment, members) in subdirs {
        let child = if dir.is_empty() {
            segment.to_owned()
        } else {
            format!("{dir}/{segment}")
        };
        let mut sub = build_dir(docs, child, members, options);
        sub.extract_index(options.category_links);
        items.push(GeneratedItem::Dir(sub));
    }

    sort_items(&mut items, options.order);

    let name = dir.rsplit('/').next().unwrap_or_default();
    let metadata = docs.category(&dir);
    let label = metadata
        .and_then(|m| m.label.clone())
        .unwrap_or_else(|| humanize_name(name));
    let position = metadata
        .and_then(|m| m.position)
        .or_else(|| parse_number_prefix(name).number.map(f64::from));

    GeneratedDir {
        dir,
        label,
        position,
        metadata,
        index_doc: None,
        items,
    }
}

/// Part of `source_dir` below `dir`. Both must be normalized and related.
fn relative_dir<'a>(source_dir: &'a str, dir: &str) -> &'a str {
    if dir.is_empty() {
        return source_dir;
    }
    source_dir
        .strip_prefix(dir)
        .map_or("", |rest| rest.trim_start_matches('/'))
}

/// Position (explicit before absent), then case-insensitive label, then path.
fn sort_items(items: &mut [GeneratedItem<'_>], order: ItemsOrder) {
    items.sort_by(|a, b| {
        let by_position = match order {
            ItemsOrder::Position => compare_positions(a.position(), b.position()),
            ItemsOrder::Alphabetical => Ordering::Equal,
        };
        by_position
            .then_with(|| a.label().to_lowercase().cmp(&b.label().to_lowercase()))
            .then_with(|| a.path().cmp(b.path()))
    });
}

fn compare_positions(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
