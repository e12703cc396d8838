//! Rewrites validated sidebars into the canonical item form.
//!
//! Doc id strings become doc items, category shorthand objects become one
//! category per key, and categories receive collapse defaults and a key.
//! Autogenerated placeholders pass through for the processor.

use sidenav_docs::naming::slugify;

use crate::model::{
    CategoryItemConfig, DocItemConfig, KeyRegistry, NormalizedCategory, NormalizedItem,
    NormalizedSidebars, SidebarItemConfig, ValidatedSidebars,
};
use crate::options::SidebarOptions;

/// Normalize validated sidebars.
///
/// Category keys are `{sidebar}/{label slug}/{label slug}...`, made unique
/// within the sidebar by suffixing `-2`, `-3`...
#[must_use]
pub fn normalize(sidebars: ValidatedSidebars, options: &SidebarOptions) -> NormalizedSidebars {
    sidebars
        .into_iter()
        .map(|(name, items)| {
            let mut normalizer = Normalizer {
                options,
                keys: KeyRegistry::default(),
            };
            let items = normalizer.items(items, &name);
            (name, items)
        })
        .collect()
}

struct Normalizer<'a> {
    options: &'a SidebarOptions,
    keys: KeyRegistry,
}

impl Normalizer<'_> {
    fn items(&mut self, items: Vec<SidebarItemConfig>, parent_key: &str) -> Vec<NormalizedItem> {
        let mut normalized = Vec::with_capacity(items.len());
        for item in items {
            match item {
                SidebarItemConfig::Shorthand(id) => {
                    normalized.push(NormalizedItem::Doc(DocItemConfig::new(id)));
                }
                SidebarItemConfig::Doc(doc) => normalized.push(NormalizedItem::Doc(doc)),
                SidebarItemConfig::Ref(doc) => normalized.push(NormalizedItem::Ref(doc)),
                SidebarItemConfig::Link(link) => normalized.push(NormalizedItem::Link(link)),
                SidebarItemConfig::Autogenerated(auto) => {
                    normalized.push(NormalizedItem::Autogenerated(auto));
                }
                SidebarItemConfig::Category(category) => {
                    normalized.push(self.category(category, parent_key));
                }
                SidebarItemConfig::CategoryShorthand(categories) => {
                    for (label, items) in categories {
                        let category = CategoryItemConfig {
                            label,
                            items,
                            collapsible: None,
                            collapsed: None,
                            link: None,
                            class_name: None,
                            custom_props: None,
                        };
                        normalized.push(self.category(category, parent_key));
                    }
                }
            }
        }
        normalized
    }

    fn category(&mut self, category: CategoryItemConfig, parent_key: &str) -> NormalizedItem {
        let slug = slugify(&category.label);
        let segment = if slug.is_empty() { "category" } else { &slug };
        let key = self.keys.claim(format!("{parent_key}/{segment}"));
        let items = self.items(category.items, &key);

        NormalizedItem::Category(NormalizedCategory {
            key,
            label: category.label,
            items,
            collapsible: category
                .collapsible
                .unwrap_or(self.options.sidebar_collapsible),
            collapsed: category.collapsed.unwrap_or(self.options.sidebar_collapsed),
            link: category.link,
            class_name: category.class_name,
            custom_props: category.custom_props,
        })
    }
}
