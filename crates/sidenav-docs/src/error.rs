//! Error type shared by document providers.

use std::path::PathBuf;

/// Semantic error categories for document providers.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocsErrorKind {
    /// Source does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Category or front matter metadata could not be parsed.
    InvalidMetadata,
    /// Two documents resolved to the same id.
    DuplicateId,
    /// Other/unknown error category.
    Other,
}

/// Provider error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct DocsError {
    /// Semantic error category.
    pub kind: DocsErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    /// Extra detail (e.g., the duplicated id).
    pub detail: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DocsError {
    /// Create a new provider error.
    #[must_use]
    pub fn new(kind: DocsErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            detail: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a provider error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => DocsErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => DocsErrorKind::PermissionDenied,
            _ => DocsErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for DocsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: detail: source (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            DocsErrorKind::NotFound => "Not found",
            DocsErrorKind::PermissionDenied => "Permission denied",
            DocsErrorKind::InvalidMetadata => "Invalid metadata",
            DocsErrorKind::DuplicateId => "Duplicate document id",
            DocsErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for DocsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
