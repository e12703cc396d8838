//! Sidebar pipeline for sidenav.
//!
//! Turns a sidebar definition file plus a document collection into fully
//! resolved navigation trees. Each stage is a plain function over owned data:
//!
//! 1. [`validate`]: check raw definitions and parse them into typed items
//! 2. [`normalize`]: expand shorthands, assign category keys and collapse
//!    defaults
//! 3. [`process`]: resolve documents, expand autogenerated placeholders and
//!    category links
//!
//! [`load_sidebars`] runs all three after reading the definition file. The
//! file is read on every call; callers that want caching keep the result.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sidenav_docs::{DocCollection, DocMetadata};
//! use sidenav_sidebars::{
//!     ProcessorProps, SidebarOptions, SidebarsConfig, normalize, process, validate,
//! };
//!
//! let docs = DocCollection::new(
//!     vec![
//!         DocMetadata::new("intro", "Introduction"),
//!         DocMetadata::new("guides/setup", "Setup"),
//!     ],
//!     Default::default(),
//! );
//! let options = SidebarOptions::default();
//! let config = SidebarsConfig::new()
//!     .with_sidebar("docs", json!(["intro", {"Guides": ["guides/setup"]}]));
//!
//! let validated = validate(&config).unwrap();
//! let normalized = normalize(validated, &options);
//! let sidebars = process(normalized, ProcessorProps { docs: &docs, options: &options }).unwrap();
//!
//! assert_eq!(sidebars.doc_ids("docs"), vec!["intro", "guides/setup"]);
//! ```

mod error;
mod generator;
mod loader;
mod model;
mod normalization;
mod options;
mod processor;
mod validation;

pub use error::{LoadError, ProcessError, ValidationError};
pub use generator::{GeneratedDir, GeneratedItem, generate};
pub use loader::{
    DEFAULT_SIDEBAR_NAME, SidebarPath, default_sidebars, disabled_sidebars, load_sidebar_file,
    load_sidebars, load_sidebars_with_provider, load_unprocessed_sidebars, resolve_sidebar_path,
};
pub use model::{
    AutogeneratedItemConfig, CategoryItemConfig, DocItemConfig, LinkItemConfig,
    NormalizedCategory, NormalizedItem, NormalizedSidebars, ResolvedCategoryLink, SidebarCategory,
    SidebarDoc, SidebarItem, SidebarItemConfig, SidebarLink, SidebarMap, Sidebars, SidebarsConfig,
    ValidatedSidebars,
};
pub use normalization::normalize;
pub use options::{CategoryIndexPolicy, ItemsOrder, ProcessorProps, SidebarOptions};
pub use processor::process;
pub use validation::validate;
