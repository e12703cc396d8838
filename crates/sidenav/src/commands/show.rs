//! `sidenav show` command implementation.

use clap::Args;
use serde_json::json;
use sidenav_sidebars::Sidebars;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print only this sidebar.
    #[arg(long)]
    sidebar: Option<String>,

    /// Print the sidebar owning this document with its previous and next
    /// documents.
    #[arg(long, conflicts_with = "sidebar")]
    doc: Option<String>,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the requested sidebar or
    /// document is not found.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.site.load()?;
        let (_, sidebars) = site.load().await?;

        let value = if let Some(id) = &self.doc {
            doc_navigation(&sidebars, id)?
        } else if let Some(name) = &self.sidebar {
            let items = sidebars.get(name).ok_or_else(|| unknown_sidebar(&sidebars, name))?;
            serde_json::to_value(items)?
        } else {
            serde_json::to_value(&sidebars)?
        };

        output.json(&value, self.compact)
    }
}

/// Owning sidebar and neighbours of a document.
fn doc_navigation(sidebars: &Sidebars, id: &str) -> Result<serde_json::Value, CliError> {
    let name = sidebars
        .sidebar_of(id)
        .ok_or_else(|| CliError::Validation(format!("document `{id}` is not in any sidebar")))?;
    let ids = sidebars.doc_ids(name);
    let (previous, next) = neighbours(&ids, id);

    Ok(json!({
        "sidebar": name,
        "previous": previous,
        "next": next,
    }))
}

/// Previous and next entries around `id`.
fn neighbours<'a>(ids: &[&'a str], id: &str) -> (Option<&'a str>, Option<&'a str>) {
    let Some(index) = ids.iter().position(|candidate| *candidate == id) else {
        return (None, None);
    };
    let previous = index.checked_sub(1).map(|i| ids[i]);
    let next = ids.get(index + 1).copied();
    (previous, next)
}

fn unknown_sidebar(sidebars: &Sidebars, name: &str) -> CliError {
    let available: Vec<_> = sidebars.names().collect();
    if available.is_empty() {
        CliError::Validation(format!("unknown sidebar `{name}` (no sidebars defined)"))
    } else {
        CliError::Validation(format!(
            "unknown sidebar `{name}` (available: {})",
            available.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sidenav_docs::{DocCollection, DocMetadata};
    use sidenav_sidebars::{
        ProcessorProps, SidebarOptions, SidebarsConfig, normalize, process, validate,
    };

    use super::*;

    fn sidebars(value: serde_json::Value) -> Sidebars {
        let docs = DocCollection::new(
            ["a", "b", "c", "d"]
                .into_iter()
                .map(|id| DocMetadata::new(id, id.to_uppercase()))
                .collect(),
            Default::default(),
        );
        let options = SidebarOptions::default();
        let config = SidebarsConfig::new().with_sidebar("docs", value);
        let normalized = normalize(validate(&config).unwrap(), &options);
        process(
            normalized,
            ProcessorProps {
                docs: &docs,
                options: &options,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_neighbours() {
        let ids = ["a", "b", "c"];

        assert_eq!(neighbours(&ids, "a"), (None, Some("b")));
        assert_eq!(neighbours(&ids, "b"), (Some("a"), Some("c")));
        assert_eq!(neighbours(&ids, "c"), (Some("b"), None));
        assert_eq!(neighbours(&ids, "x"), (None, None));
    }

    #[test]
    fn test_doc_navigation_crosses_categories() {
        let sidebars = sidebars(json!(["a", {"Group": ["b", "c"]}, "d"]));

        let value = doc_navigation(&sidebars, "b").unwrap();

        assert_eq!(
            value,
            json!({"sidebar": "docs", "previous": "a", "next": "c"})
        );
    }

    #[test]
    fn test_doc_navigation_skips_refs() {
        let sidebars = sidebars(json!(["a", {"type": "ref", "id": "b"}, "c"]));

        assert_eq!(
            doc_navigation(&sidebars, "c").unwrap(),
            json!({"sidebar": "docs", "previous": "a", "next": null})
        );
        assert!(doc_navigation(&sidebars, "b").is_err());
    }

    #[test]
    fn test_unknown_sidebar_lists_available() {
        let sidebars = sidebars(json!(["a"]));

        assert_eq!(
            unknown_sidebar(&sidebars, "api").to_string(),
            "unknown sidebar `api` (available: docs)"
        );
        assert_eq!(
            unknown_sidebar(&Sidebars::new(), "api").to_string(),
            "unknown sidebar `api` (no sidebars defined)"
        );
    }
}
