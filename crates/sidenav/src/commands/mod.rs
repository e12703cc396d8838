//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod show;

pub(crate) use check::CheckArgs;
pub(crate) use show::ShowArgs;

use std::path::PathBuf;

use clap::Args;
use sidenav_config::{CategoryLinks, CliSettings, Config, SidebarOrder, SidebarPathSetting};
use sidenav_docs::{DocCollection, DocsProvider};
use sidenav_docs_fs::FsDocs;
use sidenav_sidebars::{
    CategoryIndexPolicy, ItemsOrder, ProcessorProps, SidebarOptions, SidebarPath, Sidebars,
    load_sidebars, resolve_sidebar_path,
};

use crate::error::CliError;

/// Arguments shared by commands that load a site.
#[derive(Args, Debug, Default)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover sidenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar definition file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Disable sidebars.
    #[arg(long, conflicts_with = "sidebars")]
    no_sidebars: bool,

    /// Include draft documents.
    #[arg(long)]
    drafts: bool,
}

impl SiteArgs {
    /// Load configuration and build the site it describes.
    pub(crate) fn load(self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            sidebar_path: self.resolve_sidebar_path()?,
            source_dir: self.source_dir,
            include_drafts: self.drafts.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Using config file");
        }
        Ok(Site::from_config(&config))
    }

    /// Resolve `sidebar_path` from --sidebars/--no-sidebars flags.
    ///
    /// A relative `--sidebars` path is taken from the working directory, not
    /// the config file's directory.
    fn resolve_sidebar_path(&self) -> Result<Option<SidebarPathSetting>, CliError> {
        if self.no_sidebars {
            return Ok(Some(SidebarPathSetting::Disabled));
        }
        let Some(path) = &self.sidebars else {
            return Ok(None);
        };
        let path = if path.is_relative() {
            std::env::current_dir()?.join(path)
        } else {
            path.clone()
        };
        Ok(Some(SidebarPathSetting::File(path)))
    }
}

/// A documentation site ready to produce sidebars.
pub(crate) struct Site {
    docs: FsDocs,
    sidebar_path: SidebarPath,
    options: SidebarOptions,
}

impl Site {
    fn from_config(config: &Config) -> Self {
        let settings = &config.sidebars_resolved;
        let path = match &settings.path {
            SidebarPathSetting::Default => SidebarPath::Default,
            SidebarPathSetting::Disabled => SidebarPath::Disabled,
            SidebarPathSetting::File(file) => SidebarPath::File(file.clone()),
        };

        Self {
            docs: FsDocs::new(config.docs_resolved.source_dir.clone()),
            sidebar_path: resolve_sidebar_path(&config.site_dir, path),
            options: SidebarOptions {
                sidebar_collapsible: settings.collapsible,
                sidebar_collapsed: settings.collapsed,
                category_links: match settings.category_links {
                    CategoryLinks::None => CategoryIndexPolicy::None,
                    CategoryLinks::IndexDoc => CategoryIndexPolicy::IndexDoc,
                    CategoryLinks::GeneratedIndex => CategoryIndexPolicy::GeneratedIndex,
                },
                order: match settings.order {
                    SidebarOrder::Position => ItemsOrder::Position,
                    SidebarOrder::Alphabetical => ItemsOrder::Alphabetical,
                },
                include_drafts: settings.include_drafts,
                route_base_path: config.docs_resolved.route_base_path.clone(),
            },
        }
    }

    /// Where sidebar definitions are read from.
    pub(crate) fn sidebar_path(&self) -> &SidebarPath {
        &self.sidebar_path
    }

    /// Scan documents and load sidebars.
    ///
    /// With sidebars disabled the documents are not scanned and no
    /// collection is returned.
    pub(crate) async fn load(&self) -> Result<(Option<DocCollection>, Sidebars), CliError> {
        if self.sidebar_path == SidebarPath::Disabled {
            return Ok((None, Sidebars::new()));
        }
        let docs = self.docs.load()?;
        let sidebars = load_sidebars(
            &self.sidebar_path,
            ProcessorProps {
                docs: &docs,
                options: &self.options,
            },
        )
        .await?;
        Ok((Some(docs), sidebars))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("sidenav.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sidebar_path_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path(), "[sidebars]\npath = \"sidebars.yaml\"\n");

        let site = SiteArgs {
            config: Some(config),
            ..Default::default()
        }
        .load()
        .unwrap();

        assert_eq!(
            site.sidebar_path(),
            &SidebarPath::File(temp_dir.path().join("sidebars.yaml"))
        );
    }

    #[test]
    fn test_no_sidebars_flag_overrides_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path(), "[sidebars]\npath = \"sidebars.yaml\"\n");

        let site = SiteArgs {
            config: Some(config),
            no_sidebars: true,
            ..Default::default()
        }
        .load()
        .unwrap();

        assert_eq!(site.sidebar_path(), &SidebarPath::Disabled);
    }

    #[test]
    fn test_absolute_sidebars_flag_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path(), "");
        let file = temp_dir.path().join("other").join("sidebars.json");

        let site = SiteArgs {
            config: Some(config),
            sidebars: Some(file.clone()),
            ..Default::default()
        }
        .load()
        .unwrap();

        assert_eq!(site.sidebar_path(), &SidebarPath::File(file));
    }

    #[test]
    fn test_options_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(
            temp_dir.path(),
            r#"
[docs]
route_base_path = "/guide"

[sidebars]
collapsed = false
category_links = "generated-index"
order = "alphabetical"
"#,
        );

        let site = SiteArgs {
            config: Some(config),
            drafts: true,
            ..Default::default()
        }
        .load()
        .unwrap();

        assert_eq!(
            site.options,
            SidebarOptions {
                sidebar_collapsible: true,
                sidebar_collapsed: false,
                category_links: CategoryIndexPolicy::GeneratedIndex,
                order: ItemsOrder::Alphabetical,
                include_drafts: true,
                route_base_path: "/guide".to_owned(),
            }
        );
        assert_eq!(site.sidebar_path(), &SidebarPath::Default);
    }

    #[tokio::test]
    async fn test_disabled_site_skips_docs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(
            temp_dir.path(),
            "[docs]\nsource_dir = \"missing\"\n\n[sidebars]\npath = false\n",
        );

        let site = SiteArgs {
            config: Some(config),
            ..Default::default()
        }
        .load()
        .unwrap();
        let (docs, sidebars) = site.load().await.unwrap();

        assert!(docs.is_none());
        assert!(sidebars.is_empty());
    }

    #[tokio::test]
    async fn test_default_site_loads_docs_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path(), "");
        let docs_dir = temp_dir.path().join("docs");
        fs::create_dir_all(docs_dir.join("guides")).unwrap();
        fs::write(docs_dir.join("intro.md"), "# Intro\n").unwrap();
        fs::write(docs_dir.join("guides/setup.md"), "# Setup\n").unwrap();

        let site = SiteArgs {
            config: Some(config),
            ..Default::default()
        }
        .load()
        .unwrap();
        let (docs, sidebars) = site.load().await.unwrap();

        assert_eq!(docs.unwrap().len(), 2);
        assert_eq!(
            sidebars.doc_ids("defaultSidebar"),
            vec!["guides/setup", "intro"]
        );
    }
}
