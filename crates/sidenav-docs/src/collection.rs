//! Document and category records with lookup helpers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A document known to the site.
///
/// `source_dir` is the directory the document file lives in, exactly as on
/// disk (number prefixes included), relative to the collection root. `id` is
/// the stable identifier sidebars refer to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocMetadata {
    /// Document id (e.g., "intro", "guides/setup").
    pub id: String,
    /// Directory containing the source file ("" for the root).
    pub source_dir: String,
    /// Resolved title (front matter > H1 > file name).
    pub title: String,
    /// URL slug without leading slash, relative to the route base path.
    pub slug: String,
    /// Explicit sort position (front matter or number prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    /// Label override used in sidebars instead of the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    /// Tags from front matter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Draft documents are hidden unless drafts are included.
    #[serde(default)]
    pub draft: bool,
}

impl DocMetadata {
    /// Create a document whose directory and slug derive from its id.
    ///
    /// `"guides/setup"` lives in `"guides"` and has the slug `"guides/setup"`.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        let source_dir = id.rsplit_once('/').map_or("", |(dir, _)| dir).to_owned();
        Self {
            slug: id.clone(),
            id,
            source_dir,
            title: title.into(),
            position: None,
            sidebar_label: None,
            tags: Vec::new(),
            draft: false,
        }
    }

    /// Set the source directory.
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl AsRef<str>) -> Self {
        self.source_dir = normalize_dir_name(dir.as_ref());
        self
    }

    /// Set the slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the sort position.
    #[must_use]
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the sidebar label.
    #[must_use]
    pub fn with_sidebar_label(mut self, label: impl Into<String>) -> Self {
        self.sidebar_label = Some(label.into());
        self
    }

    /// Mark the document as a draft.
    #[must_use]
    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }

    /// Last segment of the id (e.g., "setup" for "guides/setup").
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.rsplit_once('/').map_or(&self.id, |(_, name)| name)
    }

    /// Label shown in sidebars when no explicit label is configured.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }
}

/// Link target declared for a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum CategoryLinkConfig {
    /// Link the category label to an existing document.
    Doc {
        /// Target document id.
        id: String,
    },
    /// Link the category label to a generated index page listing its items.
    GeneratedIndex {
        /// Page slug (defaults to `/category/<label>`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        /// Page title (defaults to the category label).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Page description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Per-directory category settings (e.g., from `_category_.yml`).
///
/// All fields are optional; unset values fall back to the directory name and
/// the sidebar options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryMetadata {
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Sort position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    /// Whether the category can be collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Whether the category starts collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// CSS class for the rendered category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Category link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLinkConfig>,
    /// Arbitrary data passed through to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
}

/// Immutable snapshot of the documents and category metadata of a site.
#[derive(Clone, Debug, Default)]
pub struct DocCollection {
    docs: Vec<DocMetadata>,
    categories: HashMap<String, CategoryMetadata>,
    id_index: HashMap<String, usize>,
}

impl DocCollection {
    /// Build a collection from documents and per-directory category metadata.
    ///
    /// Category keys are normalized with [`normalize_dir_name`]. When two
    /// documents share an id, the first one wins the id lookup.
    #[must_use]
    pub fn new(docs: Vec<DocMetadata>, categories: HashMap<String, CategoryMetadata>) -> Self {
        let mut id_index = HashMap::with_capacity(docs.len());
        for (i, doc) in docs.iter().enumerate() {
            id_index.entry(doc.id.clone()).or_insert(i);
        }
        let categories = categories
            .into_iter()
            .map(|(dir, meta)| (normalize_dir_name(&dir), meta))
            .collect();

        Self {
            docs,
            categories,
            id_index,
        }
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DocMetadata> {
        self.id_index.get(id).map(|&i| &self.docs[i])
    }

    /// All documents in insertion order.
    #[must_use]
    pub fn docs(&self) -> &[DocMetadata] {
        &self.docs
    }

    /// All document ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|doc| doc.id.as_str())
    }

    /// Category metadata for a directory, if any.
    #[must_use]
    pub fn category(&self, dir: &str) -> Option<&CategoryMetadata> {
        self.categories.get(dir)
    }

    /// Documents whose source directory is `dir` or one of its descendants.
    ///
    /// `dir` must already be normalized; the root (`""`) matches everything.
    pub fn docs_in_dir<'a, 'b>(
        &'a self,
        dir: &'b str,
    ) -> impl Iterator<Item = &'a DocMetadata> + use<'a, 'b> {
        self.docs
            .iter()
            .filter(move |doc| is_in_dir(&doc.source_dir, dir))
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Normalize a directory name to the collection convention.
///
/// Strips `./` prefixes and surrounding slashes, and maps `"."` to the root.
///
/// # Examples
///
/// ```
/// use sidenav_docs::normalize_dir_name;
///
/// assert_eq!(normalize_dir_name("."), "");
/// assert_eq!(normalize_dir_name("./guides/"), "guides");
/// assert_eq!(normalize_dir_name("guides\\advanced"), "guides/advanced");
/// ```
#[must_use]
pub fn normalize_dir_name(dir: &str) -> String {
    dir.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns true if `source_dir` equals `dir` or lies below it.
///
/// Both arguments must be normalized.
#[must_use]
pub fn is_in_dir(source_dir: &str, dir: &str) -> bool {
    dir.is_empty()
        || source_dir == dir
        || source_dir
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocCollection {
        DocCollection::new(
            vec![
                DocMetadata::new("intro", "Introduction"),
                DocMetadata::new("guides/setup", "Setup"),
                DocMetadata::new("guides/advanced/tuning", "Tuning"),
                DocMetadata::new("guidelines/style", "Style"),
            ],
            HashMap::from([(
                "./guides/".to_owned(),
                CategoryMetadata {
                    label: Some("All Guides".to_owned()),
                    ..Default::default()
                },
            )]),
        )
    }

    #[test]
    fn test_doc_metadata_new_derives_dir_and_slug() {
        let doc = DocMetadata::new("guides/advanced/tuning", "Tuning");

        assert_eq!(doc.source_dir, "guides/advanced");
        assert_eq!(doc.slug, "guides/advanced/tuning");
        assert_eq!(doc.name(), "tuning");
        assert!(!doc.draft);
    }

    #[test]
    fn test_doc_metadata_root_doc() {
        let doc = DocMetadata::new("intro", "Introduction");

        assert_eq!(doc.source_dir, "");
        assert_eq!(doc.name(), "intro");
    }

    #[test]
    fn test_display_label_prefers_sidebar_label() {
        let doc = DocMetadata::new("intro", "Introduction");
        assert_eq!(doc.display_label(), "Introduction");

        let doc = doc.with_sidebar_label("Start here");
        assert_eq!(doc.display_label(), "Start here");
    }

    #[test]
    fn test_get_by_id() {
        let docs = sample();

        assert_eq!(docs.get("guides/setup").unwrap().title, "Setup");
        assert!(docs.get("guides").is_none());
        assert!(docs.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let docs = DocCollection::new(
            vec![
                DocMetadata::new("intro", "First"),
                DocMetadata::new("intro", "Second"),
            ],
            HashMap::new(),
        );

        assert_eq!(docs.get("intro").unwrap().title, "First");
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_docs_in_dir_matches_descendants_only() {
        let docs = sample();

        let ids: Vec<_> = docs.docs_in_dir("guides").map(|d| d.id.as_str()).collect();

        // "guidelines" shares the prefix but is a sibling directory
        assert_eq!(ids, vec!["guides/setup", "guides/advanced/tuning"]);
    }

    #[test]
    fn test_docs_in_dir_results_outlive_dir_name() {
        let docs = sample();

        let members: Vec<&DocMetadata> = {
            let dir = normalize_dir_name("./guides/");
            docs.docs_in_dir(&dir).collect()
        };

        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_docs_in_root_matches_everything() {
        let docs = sample();
        assert_eq!(docs.docs_in_dir("").count(), 4);
    }

    #[test]
    fn test_category_keys_are_normalized() {
        let docs = sample();

        let meta = docs.category("guides").unwrap();
        assert_eq!(meta.label.as_deref(), Some("All Guides"));
    }

    #[test]
    fn test_normalize_dir_name() {
        assert_eq!(normalize_dir_name(""), "");
        assert_eq!(normalize_dir_name("."), "");
        assert_eq!(normalize_dir_name("./"), "");
        assert_eq!(normalize_dir_name("guides"), "guides");
        assert_eq!(normalize_dir_name("/guides/advanced/"), "guides/advanced");
        assert_eq!(normalize_dir_name("./guides/./advanced"), "guides/advanced");
    }

    #[test]
    fn test_is_in_dir() {
        assert!(is_in_dir("guides", ""));
        assert!(is_in_dir("", ""));
        assert!(is_in_dir("guides", "guides"));
        assert!(is_in_dir("guides/advanced", "guides"));
        assert!(!is_in_dir("guidelines", "guides"));
        assert!(!is_in_dir("", "guides"));
    }

    #[test]
    fn test_category_metadata_from_yaml() {
        let yaml = "label: Tutorial\nposition: 2\ncollapsed: false\nlink:\n  type: generated-index\n  description: Learn the basics\n";

        let meta: CategoryMetadata = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(meta.label.as_deref(), Some("Tutorial"));
        assert_eq!(meta.position, Some(2.0));
        assert_eq!(meta.collapsed, Some(false));
        assert_eq!(
            meta.link,
            Some(CategoryLinkConfig::GeneratedIndex {
                slug: None,
                title: None,
                description: Some("Learn the basics".to_owned()),
            })
        );
    }

    #[test]
    fn test_category_metadata_rejects_unknown_keys() {
        let result: Result<CategoryMetadata, _> = serde_yaml::from_str("lable: Typo");
        assert!(result.is_err());
    }

    #[test]
    fn test_category_link_doc_from_json() {
        let link: CategoryLinkConfig =
            serde_json::from_str(r#"{"type": "doc", "id": "guides/index"}"#).unwrap();

        assert_eq!(
            link,
            CategoryLinkConfig::Doc {
                id: "guides/index".to_owned()
            }
        );
    }
}
