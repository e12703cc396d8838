//! Sidebar loading: read, validate, normalize, process.
//!
//! The definition file is read on every call. Nothing is cached here, so
//! repeated loads always see the current file contents.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::json;
use sidenav_docs::DocsProvider;

use crate::error::LoadError;
use crate::model::{NormalizedSidebars, Sidebars, SidebarsConfig};
use crate::normalization::normalize;
use crate::options::{ProcessorProps, SidebarOptions};
use crate::processor::process;
use crate::validation::validate;

/// Name of the sidebar used when no definition file is configured.
pub const DEFAULT_SIDEBAR_NAME: &str = "defaultSidebar";

/// Where sidebar definitions come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SidebarPath {
    /// Nothing configured: one autogenerated sidebar over all documents.
    #[default]
    Default,
    /// Sidebars turned off.
    Disabled,
    /// Definition file (JSON, YAML or TOML by extension).
    File(PathBuf),
}

/// Make a relative definition path absolute against the site directory.
#[must_use]
pub fn resolve_sidebar_path(site_dir: &Path, path: SidebarPath) -> SidebarPath {
    match path {
        SidebarPath::File(file) if file.is_relative() => SidebarPath::File(site_dir.join(file)),
        other => other,
    }
}

/// One sidebar autogenerated from the document root.
#[must_use]
pub fn default_sidebars() -> SidebarsConfig {
    SidebarsConfig::new().with_sidebar(
        DEFAULT_SIDEBAR_NAME,
        json!([{"type": "autogenerated", "dirName": "."}]),
    )
}

/// No sidebars.
#[must_use]
pub fn disabled_sidebars() -> SidebarsConfig {
    SidebarsConfig::new()
}

/// Read the raw definitions for `path`.
///
/// A file that does not exist yields no sidebars.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read, has an unknown
/// extension, or does not parse.
pub async fn load_sidebar_file(path: &SidebarPath) -> Result<SidebarsConfig, LoadError> {
    let file = match path {
        SidebarPath::Default => return Ok(default_sidebars()),
        SidebarPath::Disabled => return Ok(disabled_sidebars()),
        SidebarPath::File(file) => file,
    };

    let content = match tokio::fs::read_to_string(file).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %file.display(), "Sidebars file not found, using no sidebars");
            return Ok(disabled_sidebars());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: file.clone(),
                source,
            });
        }
    };

    parse_sidebars(file, &content)
}

/// Parse definitions according to the file extension.
fn parse_sidebars(path: &Path, content: &str) -> Result<SidebarsConfig, LoadError> {
    let parse_error = |source: Box<dyn std::error::Error + Send + Sync>| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => serde_json::from_str(content).map_err(|e| parse_error(e.into())),
        Some("yaml" | "yml") => {
            // An empty YAML file defines no sidebars
            if content.trim().is_empty() {
                return Ok(SidebarsConfig::new());
            }
            serde_yaml::from_str(content).map_err(|e| parse_error(e.into()))
        }
        Some("toml") => toml::from_str(content).map_err(|e| parse_error(e.into())),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read, validate and normalize sidebars without touching the documents.
///
/// # Errors
///
/// Returns [`LoadError`] if reading, parsing or validation fails.
pub async fn load_unprocessed_sidebars(
    path: &SidebarPath,
    options: &SidebarOptions,
) -> Result<NormalizedSidebars, LoadError> {
    let config = load_sidebar_file(path).await?;
    let validated = validate(&config)?;
    Ok(normalize(validated, options))
}

/// Load fully processed sidebars.
///
/// # Errors
///
/// Returns the first [`LoadError`] from any stage.
pub async fn load_sidebars(
    path: &SidebarPath,
    props: ProcessorProps<'_>,
) -> Result<Sidebars, LoadError> {
    let start = Instant::now();
    let normalized = load_unprocessed_sidebars(path, props.options).await?;
    let sidebars = process(normalized, props)?;

    tracing::info!(
        sidebars = sidebars.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Loaded sidebars"
    );
    Ok(sidebars)
}

/// Load sidebars, reading documents from `provider` only when needed.
///
/// With [`SidebarPath::Disabled`] the provider is never called.
///
/// # Errors
///
/// Returns [`LoadError::Docs`] if the provider fails, otherwise as
/// [`load_sidebars`].
pub async fn load_sidebars_with_provider(
    path: &SidebarPath,
    provider: &dyn DocsProvider,
    options: &SidebarOptions,
) -> Result<Sidebars, LoadError> {
    if *path == SidebarPath::Disabled {
        return Ok(Sidebars::new());
    }
    let docs = provider.load()?;
    load_sidebars(
        path,
        ProcessorProps {
            docs: &docs,
            options,
        },
    )
    .await
}
