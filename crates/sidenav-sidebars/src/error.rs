//! Errors raised while loading sidebars.
//!
//! Every error is fatal to the load: there is no partially resolved output.

use std::path::PathBuf;

use sidenav_docs::DocsError;

/// Malformed sidebar definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The same sidebar name appears twice in one file.
    #[error("sidebar `{0}` is defined more than once")]
    DuplicateSidebar(String),
    /// The sidebar value itself has the wrong shape.
    #[error("invalid sidebar `{sidebar}`: {message}")]
    InvalidSidebar {
        /// Sidebar name.
        sidebar: String,
        /// Expected shape and what was found.
        message: String,
    },
    /// One item inside a sidebar has the wrong shape.
    #[error("invalid item {location} in sidebar `{sidebar}`: {message}")]
    InvalidItem {
        /// Sidebar name.
        sidebar: String,
        /// Item path, e.g. `[2].items[0]`.
        location: String,
        /// Expected shape and what was found.
        message: String,
    },
}

/// Sidebar refers to something the document collection does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    /// A doc id is not in the collection.
    #[error(
        "sidebar `{sidebar}` references unknown document id `{id}`{}",
        did_you_mean(.suggestion.as_deref())
    )]
    ItemNotFound {
        /// Sidebar name.
        sidebar: String,
        /// Offending id.
        id: String,
        /// Closest existing id.
        suggestion: Option<String>,
    },
    /// An autogenerated item points at a directory without documents.
    #[error("sidebar `{sidebar}` autogenerates from `{dir_name}`, which contains no documents")]
    Autogeneration {
        /// Sidebar name.
        sidebar: String,
        /// Directory as written in the definition.
        dir_name: String,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean `{s}`?)"))
}

/// Error from any stage of [`load_sidebars`](crate::load_sidebars).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The definition file could not be read.
    #[error("failed to read sidebars file {}: {source}", .path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The definition file is not valid JSON, YAML or TOML.
    #[error("failed to parse sidebars file {}: {source}", .path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The file extension names no supported format.
    #[error("unsupported sidebars file format: {} (expected .json, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Definition failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Definition failed processing.
    #[error(transparent)]
    Process(#[from] ProcessError),
    /// Documents could not be loaded.
    #[error("failed to load documents: {0}")]
    Docs(#[from] DocsError),
}
