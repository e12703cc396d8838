//! Options controlling normalization and processing.

use sidenav_docs::DocCollection;

/// How categories obtain a landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryIndexPolicy {
    /// Only explicitly configured links.
    None,
    /// Autogenerated categories link to their index document.
    #[default]
    IndexDoc,
    /// As `IndexDoc`, and every remaining link-less category gets a
    /// generated index page.
    GeneratedIndex,
}

/// Sort order for autogenerated items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemsOrder {
    /// Explicit positions first, then label.
    #[default]
    Position,
    /// Label only.
    Alphabetical,
}

/// Sidebar options.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarOptions {
    /// Default collapsibility of categories.
    pub sidebar_collapsible: bool,
    /// Default collapsed state of categories.
    pub sidebar_collapsed: bool,
    /// Category landing page policy.
    pub category_links: CategoryIndexPolicy,
    /// Autogenerated item order.
    pub order: ItemsOrder,
    /// Keep draft documents.
    pub include_drafts: bool,
    /// URL prefix for permalinks (e.g., "/docs").
    pub route_base_path: String,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            sidebar_collapsible: true,
            sidebar_collapsed: true,
            category_links: CategoryIndexPolicy::default(),
            order: ItemsOrder::default(),
            include_drafts: false,
            route_base_path: "/docs".to_owned(),
        }
    }
}

impl SidebarOptions {
    /// Returns true if the document should appear in sidebars.
    pub(crate) fn is_visible(&self, draft: bool) -> bool {
        self.include_drafts || !draft
    }

    /// Site URL for a slug under the route base path.
    ///
    /// Repeated slashes collapse and a trailing slash is dropped.
    pub(crate) fn permalink(&self, slug: &str) -> String {
        let joined = format!("{}/{slug}", self.route_base_path);
        let mut url = String::with_capacity(joined.len());
        for c in joined.chars() {
            if c == '/' && url.ends_with('/') {
                continue;
            }
            url.push(c);
        }
        if url.len() > 1 && url.ends_with('/') {
            url.pop();
        }
        url
    }
}

/// Inputs to [`process`](crate::process).
#[derive(Debug, Clone, Copy)]
pub struct ProcessorProps<'a> {
    /// Document collection snapshot.
    pub docs: &'a DocCollection,
    /// Sidebar options.
    pub options: &'a SidebarOptions,
}
