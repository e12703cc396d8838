//! Resolves normalized sidebars against the document collection.
//!
//! For each sidebar, depth-first:
//!
//! - doc and ref items are looked up and annotated with title and permalink
//! - links pass through
//! - categories get their children processed and their link resolved
//! - autogenerated placeholders are replaced by the generated tree
//!
//! Any unknown document id fails the whole run.

use sidenav_docs::naming::slugify;
use sidenav_docs::{CategoryLinkConfig, DocCollection, DocMetadata};

use crate::error::ProcessError;
use crate::generator::{self, GeneratedDir, GeneratedItem};
use crate::model::{
    AutogeneratedItemConfig, DocItemConfig, KeyRegistry, NormalizedCategory, NormalizedItem,
    NormalizedSidebars, ResolvedCategoryLink, SidebarCategory, SidebarDoc, SidebarItem,
    SidebarLink, Sidebars,
};
use crate::options::{CategoryIndexPolicy, ProcessorProps, SidebarOptions};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Process normalized sidebars.
///
/// # Errors
///
/// Returns [`ProcessError::ItemNotFound`] for the first unknown document id
/// and [`ProcessError::Autogeneration`] for a placeholder whose directory
/// holds no documents.
pub fn process(
    sidebars: NormalizedSidebars,
    props: ProcessorProps<'_>,
) -> Result<Sidebars, ProcessError> {
    sidebars
        .into_iter()
        .map(|(name, items)| {
            let items = SidebarProcessor::new(&name, props, &items).sidebar(items)?;
            tracing::debug!(sidebar = %name, items = items.len(), "Processed sidebar");
            Ok((name, items))
        })
        .collect()
}

struct SidebarProcessor<'a> {
    sidebar: &'a str,
    docs: &'a DocCollection,
    options: &'a SidebarOptions,
    keys: KeyRegistry,
}

impl<'a> SidebarProcessor<'a> {
    fn new(sidebar: &'a str, props: ProcessorProps<'a>, items: &[NormalizedItem]) -> Self {
        let mut keys = KeyRegistry::default();
        reserve_keys(items, &mut keys);
        Self {
            sidebar,
            docs: props.docs,
            options: props.options,
            keys,
        }
    }

    fn sidebar(&mut self, items: Vec<NormalizedItem>) -> Result<Vec<SidebarItem>, ProcessError> {
        // A lone placeholder contributes its children, not a wrapper category
        let sole = items.len() == 1;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            self.item(item, sole, &mut out)?;
        }
        Ok(out)
    }

    fn item(
        &mut self,
        item: NormalizedItem,
        sole: bool,
        out: &mut Vec<SidebarItem>,
    ) -> Result<(), ProcessError> {
        match item {
            NormalizedItem::Doc(doc) => out.extend(self.doc(doc, false)?.map(SidebarItem::Doc)),
            NormalizedItem::Ref(doc) => out.extend(self.doc(doc, true)?.map(SidebarItem::Doc)),
            NormalizedItem::Link(link) => out.push(SidebarItem::Link(SidebarLink {
                href: link.href,
                label: link.label,
                class_name: link.class_name,
                custom_props: link.custom_props,
            })),
            NormalizedItem::Category(category) => out.push(self.category(category)?),
            NormalizedItem::Autogenerated(auto) => self.autogenerated(auto, sole, out)?,
        }
        Ok(())
    }

    /// Resolve a doc or ref item. Hidden drafts resolve to `None`.
    fn doc(
        &self,
        item: DocItemConfig,
        is_ref: bool,
    ) -> Result<Option<SidebarDoc>, ProcessError> {
        let doc = self.lookup(&item.id)?;
        if !self.options.is_visible(doc.draft) {
            tracing::debug!(sidebar = self.sidebar, id = %doc.id, "Skipping draft document");
            return Ok(None);
        }
        Ok(Some(SidebarDoc {
            label: item.label.unwrap_or_else(|| doc.display_label().to_owned()),
            class_name: item.class_name,
            custom_props: item.custom_props,
            is_ref,
            ..self.doc_entry(doc)
        }))
    }

    fn doc_entry(&self, doc: &DocMetadata) -> SidebarDoc {
        SidebarDoc {
            id: doc.id.clone(),
            label: doc.display_label().to_owned(),
            title: doc.title.clone(),
            permalink: self.options.permalink(&doc.slug),
            class_name: None,
            custom_props: None,
            is_ref: false,
        }
    }

    fn category(&mut self, category: NormalizedCategory) -> Result<SidebarItem, ProcessError> {
        let mut items = Vec::with_capacity(category.items.len());
        for item in category.items {
            self.item(item, false, &mut items)?;
        }
        let link = match category.link {
            Some(link) => self.link(link, &category.label)?,
            None => self.default_link(&category.label),
        };

        Ok(finish(SidebarCategory {
            key: category.key,
            label: category.label,
            items,
            collapsible: category.collapsible,
            collapsed: category.collapsed,
            link,
            class_name: category.class_name,
            custom_props: category.custom_props,
        }))
    }

    fn autogenerated(
        &mut self,
        auto: AutogeneratedItemConfig,
        sole: bool,
        out: &mut Vec<SidebarItem>,
    ) -> Result<(), ProcessError> {
        let Some(mut tree) = generator::generate(self.docs, &auto.dir_name, self.options) else {
            return Err(ProcessError::Autogeneration {
                sidebar: self.sidebar.to_owned(),
                dir_name: auto.dir_name,
            });
        };

        if sole || tree.dir.is_empty() {
            for item in tree.items {
                out.extend(self.generated_item(item)?);
            }
        } else {
            tree.extract_index(self.options.category_links);
            out.extend(self.generated_dir(tree)?);
        }
        Ok(())
    }

    fn generated_item(
        &mut self,
        item: GeneratedItem<'_>,
    ) -> Result<Option<SidebarItem>, ProcessError> {
        match item {
            GeneratedItem::Doc(doc) => Ok(Some(SidebarItem::Doc(self.doc_entry(doc)))),
            GeneratedItem::Dir(dir) => self.generated_dir(dir),
        }
    }

    fn generated_dir(
        &mut self,
        dir: GeneratedDir<'_>,
    ) -> Result<Option<SidebarItem>, ProcessError> {
        let key = self.keys.claim(format!("{}/{}", self.sidebar, dir.dir));
        let metadata = dir.metadata;

        let link = match metadata.and_then(|m| m.link.clone()) {
            Some(link) => self.link(link, &dir.label)?,
            None => match dir.index_doc {
                Some(doc) => Some(ResolvedCategoryLink::Doc {
                    id: doc.id.clone(),
                    permalink: self.options.permalink(&doc.slug),
                }),
                None => self.default_link(&dir.label),
            },
        };

        let mut items = Vec::with_capacity(dir.items.len());
        for item in dir.items {
            items.extend(self.generated_item(item)?);
        }

        if items.is_empty() && link.is_none() {
            tracing::debug!(key = %key, "Dropping empty generated category");
            return Ok(None);
        }

        Ok(Some(finish(SidebarCategory {
            key,
            label: dir.label,
            items,
            collapsible: metadata
                .and_then(|m| m.collapsible)
                .unwrap_or(self.options.sidebar_collapsible),
            collapsed: metadata
                .and_then(|m| m.collapsed)
                .unwrap_or(self.options.sidebar_collapsed),
            link,
            class_name: metadata.and_then(|m| m.class_name.clone()),
            custom_props: metadata.and_then(|m| m.custom_props.clone()),
        })))
    }

    /// Resolve a declared category link. A link to a hidden draft is dropped.
    fn link(
        &self,
        link: CategoryLinkConfig,
        label: &str,
    ) -> Result<Option<ResolvedCategoryLink>, ProcessError> {
        match link {
            CategoryLinkConfig::Doc { id } => {
                let doc = self.lookup(&id)?;
                if !self.options.is_visible(doc.draft) {
                    return Ok(None);
                }
                Ok(Some(ResolvedCategoryLink::Doc {
                    id,
                    permalink: self.options.permalink(&doc.slug),
                }))
            }
            CategoryLinkConfig::GeneratedIndex {
                slug,
                title,
                description,
            } => Ok(Some(self.generated_index(label, slug, title, description))),
        }
    }

    /// Link for a category that declares none.
    fn default_link(&self, label: &str) -> Option<ResolvedCategoryLink> {
        (self.options.category_links == CategoryIndexPolicy::GeneratedIndex)
            .then(|| self.generated_index(label, None, None, None))
    }

    fn generated_index(
        &self,
        label: &str,
        slug: Option<String>,
        title: Option<String>,
        description: Option<String>,
    ) -> ResolvedCategoryLink {
        let slug = slug.unwrap_or_else(|| format!("/category/{}", slugify(label)));
        ResolvedCategoryLink::GeneratedIndex {
            permalink: self.options.permalink(&slug),
            slug,
            title: title.unwrap_or_else(|| label.to_owned()),
            description,
        }
    }

    fn lookup(&self, id: &str) -> Result<&'a DocMetadata, ProcessError> {
        self.docs.get(id).ok_or_else(|| ProcessError::ItemNotFound {
            sidebar: self.sidebar.to_owned(),
            id: id.to_owned(),
            suggestion: closest_id(self.docs, id),
        })
    }
}

/// A category that is not collapsible is never collapsed.
fn finish(mut category: SidebarCategory) -> SidebarItem {
    category.collapsed &= category.collapsible;
    SidebarItem::Category(category)
}

fn reserve_keys(items: &[NormalizedItem], keys: &mut KeyRegistry) {
    for item in items {
        if let NormalizedItem::Category(category) = item {
            keys.reserve(&category.key);
            reserve_keys(&category.items, keys);
        }
    }
}

/// Most similar existing id, if similar enough. Case is ignored.
fn closest_id(docs: &DocCollection, id: &str) -> Option<String> {
    let id = id.to_lowercase();
    docs.ids()
        .map(|candidate| (strsim::jaro_winkler(&id, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_owned())
}
