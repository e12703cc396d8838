//! Sidebar item types for each pipeline stage.
//!
//! - [`SidebarsConfig`]: the raw mapping as read from a definition file
//! - [`SidebarItemConfig`]: a validated item, shorthand forms still present
//! - [`NormalizedItem`]: the canonical item, every default filled in
//! - [`SidebarItem`]: the processed item handed to renderers
//!
//! Every stage keeps sidebars in a [`SidebarMap`], which preserves the order
//! in which sidebars were declared.

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use sidenav_docs::CategoryLinkConfig;

/// Ordered mapping from sidebar name to its items.
#[derive(Clone, Debug, PartialEq)]
pub struct SidebarMap<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for SidebarMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> SidebarMap<T> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sidebar. Callers keep names unique.
    pub(crate) fn push(&mut self, name: String, items: Vec<T>) {
        self.entries.push((name, items));
    }

    /// Items of the named sidebar.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items.as_slice())
    }

    /// Sidebar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Sidebars in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, Vec<T>)> for SidebarMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for SidebarMap<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for SidebarMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, items) in &self.entries {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

/// Raw sidebar definitions, one unvalidated value per sidebar.
///
/// Deserialization keeps every entry in file order, including repeated
/// names, so that validation can report them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarsConfig {
    entries: Vec<(String, Value)>,
}

impl SidebarsConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sidebar definition.
    #[must_use]
    pub fn with_sidebar(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Number of entries, repeated names included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no sidebar is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for SidebarsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SidebarsConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from sidebar name to sidebar items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    entries.push((name, value));
                }
                Ok(SidebarsConfig { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// A validated item. Shorthand forms are still present.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarItemConfig {
    /// Bare doc id string.
    Shorthand(String),
    /// `{type: "doc"}`.
    Doc(DocItemConfig),
    /// `{type: "ref"}`.
    Ref(DocItemConfig),
    /// `{type: "link"}`.
    Link(LinkItemConfig),
    /// `{type: "category"}`.
    Category(CategoryItemConfig),
    /// `{"Label": [...]}`, one category per key.
    CategoryShorthand(Vec<(String, Vec<SidebarItemConfig>)>),
    /// `{type: "autogenerated"}`.
    Autogenerated(AutogeneratedItemConfig),
}

/// Document reference fields, shared by `doc` and `ref` items.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocItemConfig {
    /// Referenced document id.
    pub id: String,
    /// Label override.
    #[serde(default)]
    pub label: Option<String>,
    /// CSS class.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Renderer data.
    #[serde(default)]
    pub custom_props: Option<Value>,
}

impl DocItemConfig {
    /// Reference a document by id with no overrides.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            class_name: None,
            custom_props: None,
        }
    }
}

/// Link item fields.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkItemConfig {
    /// Link target, never checked against the documents.
    pub href: String,
    /// Visible label.
    pub label: String,
    /// CSS class.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Renderer data.
    #[serde(default)]
    pub custom_props: Option<Value>,
}

/// Explicit category with validated children.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryItemConfig {
    /// Visible label.
    pub label: String,
    /// Child items.
    pub items: Vec<SidebarItemConfig>,
    /// Collapsibility; `None` takes the option default.
    pub collapsible: Option<bool>,
    /// Initial collapse state; `None` takes the option default.
    pub collapsed: Option<bool>,
    /// Category link.
    pub link: Option<CategoryLinkConfig>,
    /// CSS class.
    pub class_name: Option<String>,
    /// Renderer data.
    pub custom_props: Option<Value>,
}

/// Placeholder for a category tree mirrored from a docs directory.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AutogeneratedItemConfig {
    /// Directory relative to the docs root; `"."` is the root.
    pub dir_name: String,
}

/// Validated sidebars.
pub type ValidatedSidebars = SidebarMap<SidebarItemConfig>;

/// Canonical item produced by normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedItem {
    /// Document that belongs to this sidebar.
    Doc(DocItemConfig),
    /// Document linked from this sidebar but owned elsewhere.
    Ref(DocItemConfig),
    /// External or internal link.
    Link(LinkItemConfig),
    /// Category with defaults applied.
    Category(NormalizedCategory),
    /// Placeholder resolved during processing.
    Autogenerated(AutogeneratedItemConfig),
}

/// Category with every default filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedCategory {
    /// Stable identity, unique within its sidebar.
    pub key: String,
    /// Visible label.
    pub label: String,
    /// Child items.
    pub items: Vec<NormalizedItem>,
    /// Whether the category can be collapsed.
    pub collapsible: bool,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Category link.
    pub link: Option<CategoryLinkConfig>,
    /// CSS class.
    pub class_name: Option<String>,
    /// Renderer data.
    pub custom_props: Option<Value>,
}

/// Normalized sidebars.
pub type NormalizedSidebars = SidebarMap<NormalizedItem>;

/// Resolved sidebar entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Document entry.
    Doc(SidebarDoc),
    /// Link entry.
    Link(SidebarLink),
    /// Category entry.
    Category(SidebarCategory),
}

/// Resolved document entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarDoc {
    pub id: String,
    pub label: String,
    pub title: String,
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
    /// Set for `ref` items: the document does not belong to this sidebar.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_ref: bool,
}

/// Resolved link entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarLink {
    pub href: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
}

/// Resolved category entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCategory {
    pub key: String,
    pub label: String,
    pub items: Vec<SidebarItem>,
    pub collapsible: bool,
    /// Never true when `collapsible` is false.
    pub collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ResolvedCategoryLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Value>,
}

/// Category link with its target resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedCategoryLink {
    /// Link to an existing document.
    Doc { id: String, permalink: String },
    /// Link to a generated index page.
    GeneratedIndex {
        slug: String,
        permalink: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Processed sidebars.
pub type Sidebars = SidebarMap<SidebarItem>;

impl SidebarMap<SidebarItem> {
    /// Ids of the documents owned by a sidebar, in display order.
    ///
    /// `ref` entries are skipped. Category doc links count and come before
    /// the category's children. Returns an empty list for unknown sidebars.
    #[must_use]
    pub fn doc_ids(&self, name: &str) -> Vec<&str> {
        let mut ids = Vec::new();
        if let Some(items) = self.get(name) {
            collect_doc_ids(items, &mut ids);
        }
        ids
    }

    /// Name of the first sidebar that owns the document.
    #[must_use]
    pub fn sidebar_of(&self, id: &str) -> Option<&str> {
        self.names().find(|name| self.doc_ids(name).contains(&id))
    }
}

fn collect_doc_ids<'a>(items: &'a [SidebarItem], ids: &mut Vec<&'a str>) {
    for item in items {
        match item {
            SidebarItem::Doc(doc) if !doc.is_ref => ids.push(&doc.id),
            SidebarItem::Category(category) => {
                if let Some(ResolvedCategoryLink::Doc { id, .. }) = &category.link {
                    ids.push(id);
                }
                collect_doc_ids(&category.items, ids);
            }
            SidebarItem::Doc(_) | SidebarItem::Link(_) => {}
        }
    }
}

/// Hands out category keys, suffixing `-2`, `-3`... on collision.
#[derive(Debug, Default)]
pub(crate) struct KeyRegistry {
    used: HashSet<String>,
}

impl KeyRegistry {
    /// Mark a key as taken.
    pub fn reserve(&mut self, key: &str) {
        self.used.insert(key.to_owned());
    }

    /// Claim `base`, or the first free suffixed variant of it.
    pub fn claim(&mut self, base: String) -> String {
        if !self.used.contains(&base) {
            self.used.insert(base.clone());
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
