//! `sidenav check` command implementation.

use std::collections::HashSet;
use std::fmt;

use clap::Args;
use sidenav_docs::DocCollection;
use sidenav_sidebars::{SidebarItem, Sidebars};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if any sidebar fails to load.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.site.load()?;
        output.sidebar_source(site.sidebar_path());

        let (docs, sidebars) = site.load().await?;
        if sidebars.is_empty() {
            output.warning("No sidebars defined");
        }
        for (name, items) in sidebars.iter() {
            output.entry(name, &SidebarStats::collect(items).to_string());
        }

        if let Some(docs) = docs {
            let unlisted = unlisted_docs(&docs, &sidebars);
            if !unlisted.is_empty() {
                output.warning(&format!(
                    "{} documents are not in any sidebar: {}",
                    unlisted.len(),
                    unlisted.join(", ")
                ));
            }
        }

        output.success("Sidebars OK");
        Ok(())
    }
}

/// Item counts for one sidebar.
#[derive(Debug, Default, PartialEq, Eq)]
struct SidebarStats {
    docs: usize,
    refs: usize,
    links: usize,
    categories: usize,
}

impl fmt::Display for SidebarStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} docs, {} refs, {} links, {} categories",
            self.docs, self.refs, self.links, self.categories
        )
    }
}

impl SidebarStats {
    fn collect(items: &[SidebarItem]) -> Self {
        let mut stats = Self::default();
        stats.add(items);
        stats
    }

    fn add(&mut self, items: &[SidebarItem]) {
        for item in items {
            match item {
                SidebarItem::Doc(doc) if doc.is_ref => self.refs += 1,
                SidebarItem::Doc(_) => self.docs += 1,
                SidebarItem::Link(_) => self.links += 1,
                SidebarItem::Category(category) => {
                    self.categories += 1;
                    self.add(&category.items);
                }
            }
        }
    }
}

/// Ids of visible documents owned by no sidebar, in collection order.
fn unlisted_docs<'a>(docs: &'a DocCollection, sidebars: &Sidebars) -> Vec<&'a str> {
    let listed: HashSet<&str> = sidebars
        .names()
        .flat_map(|name| sidebars.doc_ids(name))
        .collect();
    docs.docs()
        .iter()
        .filter(|doc| !doc.draft && !listed.contains(doc.id.as_str()))
        .map(|doc| doc.id.as_str())
        .collect()
}
