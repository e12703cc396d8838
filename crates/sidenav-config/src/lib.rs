//! Configuration management for sidenav.
//!
//! Parses `sidenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.route_base_path`
//! - `sidebars.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the sidebar definition location.
    pub sidebar_path: Option<SidebarPathSetting>,
    /// Override draft inclusion.
    pub include_drafts: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sidenav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar configuration as written.
    sidebars: SidebarsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sidebar settings (set after loading).
    #[serde(skip)]
    pub sidebars_resolved: SidebarsSettings,
    /// Directory that relative sidebar paths resolve against.
    #[serde(skip)]
    pub site_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    route_base_path: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Clone, PartialEq)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// URL prefix for document permalinks.
    pub route_base_path: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            route_base_path: DEFAULT_ROUTE_BASE_PATH.to_owned(),
        }
    }
}

const DEFAULT_ROUTE_BASE_PATH: &str = "/docs";

/// `sidebars.path` as written: a path string or a boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SidebarPathRaw {
    Flag(bool),
    Path(String),
}

/// Raw sidebar configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SidebarsConfigRaw {
    path: Option<SidebarPathRaw>,
    collapsible: Option<bool>,
    collapsed: Option<bool>,
    category_links: Option<CategoryLinks>,
    order: Option<SidebarOrder>,
    include_drafts: Option<bool>,
}

/// Where sidebar definitions come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SidebarPathSetting {
    /// No path configured: one autogenerated sidebar over all docs.
    #[default]
    Default,
    /// Sidebars turned off.
    Disabled,
    /// Definition file. Relative paths resolve against the site directory.
    File(PathBuf),
}

/// How categories obtain a landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryLinks {
    /// Only explicitly configured links.
    None,
    /// Link autogenerated categories to their index document.
    #[default]
    IndexDoc,
    /// Give every link-less category a generated index page.
    GeneratedIndex,
}

/// Sort order for autogenerated items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarOrder {
    /// Explicit positions first, then label.
    #[default]
    Position,
    /// Label only.
    Alphabetical,
}

/// Resolved sidebar settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarsSettings {
    /// Definition location.
    pub path: SidebarPathSetting,
    /// Default collapsibility of categories.
    pub collapsible: bool,
    /// Default collapsed state of categories.
    pub collapsed: bool,
    /// Category landing page policy.
    pub category_links: CategoryLinks,
    /// Autogenerated item order.
    pub order: SidebarOrder,
    /// Whether draft documents appear in sidebars.
    pub include_drafts: bool,
}

impl Default for SidebarsSettings {
    fn default() -> Self {
        Self {
            path: SidebarPathSetting::Default,
            collapsible: true,
            collapsed: true,
            category_links: CategoryLinks::default(),
            order: SidebarOrder::default(),
            include_drafts: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sidenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(path) = &settings.sidebar_path {
            self.sidebars_resolved.path = path.clone();
        }
        if let Some(include_drafts) = settings.include_drafts {
            self.sidebars_resolved.include_drafts = include_drafts;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            sidebars: SidebarsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                route_base_path: DEFAULT_ROUTE_BASE_PATH.to_owned(),
            },
            sidebars_resolved: SidebarsSettings::default(),
            site_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.docs_resolved.route_base_path;
        require_non_empty(base, "docs.route_base_path")?;
        if !base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "docs.route_base_path must start with '/', got '{base}'"
            )));
        }

        if let SidebarPathSetting::File(path) = &self.sidebars_resolved.path {
            require_non_empty(&path.to_string_lossy(), "sidebars.path")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref base) = self.docs.route_base_path {
            self.docs.route_base_path = Some(expand::expand_env(base, "docs.route_base_path")?);
        }
        if let Some(SidebarPathRaw::Path(ref path)) = self.sidebars.path {
            self.sidebars.path = Some(SidebarPathRaw::Path(expand::expand_env(
                path,
                "sidebars.path",
            )?));
        }
        Ok(())
    }

    /// Resolve relative paths and fill in defaults.
    ///
    /// `sidebars.path = true` is rejected: only a path or `false` is meaningful.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            route_base_path: self
                .docs
                .route_base_path
                .clone()
                .unwrap_or_else(|| DEFAULT_ROUTE_BASE_PATH.to_owned()),
        };

        let path = match &self.sidebars.path {
            None => SidebarPathSetting::Default,
            Some(SidebarPathRaw::Flag(false)) => SidebarPathSetting::Disabled,
            Some(SidebarPathRaw::Flag(true)) => {
                return Err(ConfigError::Validation(
                    "sidebars.path must be a file path or false".to_owned(),
                ));
            }
            Some(SidebarPathRaw::Path(p)) => SidebarPathSetting::File(PathBuf::from(p)),
        };

        let defaults = SidebarsSettings::default();
        self.sidebars_resolved = SidebarsSettings {
            path,
            collapsible: self.sidebars.collapsible.unwrap_or(defaults.collapsible),
            collapsed: self.sidebars.collapsed.unwrap_or(defaults.collapsed),
            category_links: self.sidebars.category_links.unwrap_or_default(),
            order: self.sidebars.order.unwrap_or_default(),
            include_drafts: self.sidebars.include_drafts.unwrap_or(defaults.include_drafts),
        };
        self.site_dir = config_dir.to_path_buf();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(toml: &str, config_dir: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new(config_dir)).unwrap();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.route_base_path, "/docs");
        assert_eq!(config.sidebars_resolved, SidebarsSettings::default());
        assert_eq!(config.site_dir, PathBuf::from("/test"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("", "/project");

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/docs"));
        assert_eq!(config.sidebars_resolved.path, SidebarPathSetting::Default);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[docs]
source_dir = "content"
route_base_path = "/guide"

[sidebars]
path = "sidebars.yaml"
collapsible = false
collapsed = false
category_links = "generated-index"
order = "alphabetical"
include_drafts = true
"#;
        let config = parse(toml, "/project");

        assert_eq!(
            config.docs_resolved,
            DocsConfig {
                source_dir: PathBuf::from("/project/content"),
                route_base_path: "/guide".to_owned(),
            }
        );
        assert_eq!(
            config.sidebars_resolved,
            SidebarsSettings {
                path: SidebarPathSetting::File(PathBuf::from("sidebars.yaml")),
                collapsible: false,
                collapsed: false,
                category_links: CategoryLinks::GeneratedIndex,
                order: SidebarOrder::Alphabetical,
                include_drafts: true,
            }
        );
        assert_eq!(config.site_dir, PathBuf::from("/project"));
    }

    #[test]
    fn test_parse_sidebars_disabled() {
        let config = parse("[sidebars]\npath = false\n", "/project");

        assert_eq!(config.sidebars_resolved.path, SidebarPathSetting::Disabled);
    }

    #[test]
    fn test_parse_sidebars_path_true_rejected() {
        let mut config: Config = toml::from_str("[sidebars]\npath = true\n").unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("sidebars.path"));
    }

    #[test]
    fn test_parse_unknown_category_links_fails() {
        let result: Result<Config, _> = toml::from_str("[sidebars]\ncategory_links = \"all\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[sidebars]\npath = \"nav.json\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.site_dir, temp_dir.path());
        assert_eq!(
            config.sidebars_resolved.path,
            SidebarPathSetting::File(PathBuf::from("nav.json"))
        );
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/sidenav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.route_base_path, "/docs"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_sidebar_path() {
        let mut config = parse("[sidebars]\npath = \"sidebars.json\"\n", "/test");
        let overrides = CliSettings {
            sidebar_path: Some(SidebarPathSetting::Disabled),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.sidebars_resolved.path, SidebarPathSetting::Disabled);
    }

    #[test]
    fn test_apply_cli_settings_drafts() {
        let mut config = Config::default_with_base(Path::new("/test"));
        assert!(!config.sidebars_resolved.include_drafts);

        let overrides = CliSettings {
            include_drafts: Some(true),
            ..Default::default()
        };
        config.apply_cli_settings(&overrides);

        assert!(config.sidebars_resolved.include_drafts);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.sidebars_resolved, SidebarsSettings::default());
    }

    #[test]
    fn test_expand_env_vars_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_SIDENAV_DOCS", "handbook");
        }

        let toml = r#"
[docs]
source_dir = "${TEST_SIDENAV_DOCS}"
route_base_path = "/${TEST_SIDENAV_ROUTE:-manual}"

[sidebars]
path = "${TEST_SIDENAV_DOCS}/sidebars.yml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/site")).unwrap();

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/site/handbook"));
        assert_eq!(config.docs_resolved.route_base_path, "/manual");
        assert_eq!(
            config.sidebars_resolved.path,
            SidebarPathSetting::File(PathBuf::from("handbook/sidebars.yml"))
        );

        unsafe {
            std::env::remove_var("TEST_SIDENAV_DOCS");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_SIDENAV_VAR");
        }

        let mut config: Config =
            toml::from_str("[sidebars]\npath = \"${MISSING_SIDENAV_VAR}\"\n").unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_SIDENAV_VAR"));
        assert!(err.to_string().contains("sidebars.path"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_route_base_path_relative() {
        let config = parse("[docs]\nroute_base_path = \"docs\"\n", "/test");
        assert_validation_error(&config, &["docs.route_base_path", "must start with '/'"]);
    }

    #[test]
    fn test_validate_route_base_path_empty() {
        let config = parse("[docs]\nroute_base_path = \"\"\n", "/test");
        assert_validation_error(&config, &["docs.route_base_path", "cannot be empty"]);
    }

    #[test]
    fn test_validate_sidebars_path_empty() {
        let config = parse("[sidebars]\npath = \"\"\n", "/test");
        assert_validation_error(&config, &["sidebars.path", "cannot be empty"]);
    }
}
